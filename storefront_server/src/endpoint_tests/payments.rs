use actix_web::http::StatusCode;
use serde_json::json;
use storefront_engine::{
    db_types::{Payment, PaymentStatus},
    objects::OrderWithItems,
};

use super::helpers::{get, patch_json, post_json, seed_products, send, test_app, test_db, TEST_RZP_SECRET};
use crate::{data_objects::RazorpayOrderResponse, helpers::calculate_signature};

async fn place_order<S, B>(app: &S, store_id: i64, product_id: i64) -> OrderWithItems
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let (status, body) = send(app, post_json("/order", &json!({
        "user_id": "alice",
        "store_id": store_id,
        "items": [{ "product_id": product_id, "quantity": 1 }],
    })))
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    serde_json::from_str(&body).unwrap()
}

#[actix_web::test]
async fn one_payment_per_order_and_status_updates() {
    let db = test_db().await;
    let (store_id, products) = seed_products(&db, &[5000], 10).await;
    let app = test_app!(db);
    let order = place_order(&app, store_id, products[0]).await;

    let body = json!({ "order_id": order.order.id, "amount": 5000, "method": "UPI" });
    let (status, text) = send(&app, post_json("/payment", &body)).await;
    assert_eq!(status, StatusCode::CREATED, "{text}");
    let payment: Payment = serde_json::from_str(&text).unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);

    let (status, text) = send(&app, post_json("/payment", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(text.contains("already exists"), "{text}");

    let (status, text) =
        send(&app, patch_json(&format!("/payment/{}/status", payment.id), &json!({ "status": "SUCCESS" }))).await;
    assert_eq!(status, StatusCode::OK, "{text}");
    let updated: Payment = serde_json::from_str(&text).unwrap();
    assert_eq!(updated.status, PaymentStatus::Success);

    let (status, text) = send(&app, get(&format!("/payment/order/{}", order.order.id))).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: Payment = serde_json::from_str(&text).unwrap();
    assert_eq!(fetched.id, payment.id);
}

#[actix_web::test]
async fn cancelling_a_paid_order_refunds_the_payment() {
    let db = test_db().await;
    let (store_id, products) = seed_products(&db, &[5000], 10).await;
    let app = test_app!(db);
    let order = place_order(&app, store_id, products[0]).await;

    send(&app, post_json("/payment", &json!({ "order_id": order.order.id, "amount": 5000, "method": "CARD" }))).await;
    let (status, body) =
        send(&app, actix_web::test::TestRequest::delete().uri(&format!("/order/{}", order.order.id))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let cancelled: OrderWithItems = serde_json::from_str(&body).unwrap();
    assert_eq!(cancelled.payment.unwrap().status, PaymentStatus::Refunded);
}

#[actix_web::test]
async fn payment_for_unknown_order_is_a_404() {
    let db = test_db().await;
    let app = test_app!(db);
    let (status, body) =
        send(&app, post_json("/payment", &json!({ "order_id": 424242, "amount": 100, "method": "COD" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");
}

#[actix_web::test]
async fn razorpay_order_creation_and_signature_verification() {
    let db = test_db().await;
    let app = test_app!(db);

    let (status, body) = send(&app, post_json("/payment/razorpay/create-order", &json!({ "amount": 150_000 }))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let gateway_order: RazorpayOrderResponse = serde_json::from_str(&body).unwrap();
    assert!(gateway_order.id.starts_with("order_"));
    assert_eq!(gateway_order.amount.value(), 150_000);
    assert_eq!(gateway_order.currency, "INR");

    let signature = calculate_signature(TEST_RZP_SECRET, &gateway_order.id, "pay_123");
    let (status, body) = send(&app, post_json("/payment/razorpay/verify", &json!({
        "razorpay_order_id": &gateway_order.id,
        "razorpay_payment_id": "pay_123",
        "razorpay_signature": &signature,
    })))
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, body) = send(&app, post_json("/payment/razorpay/verify", &json!({
        "razorpay_order_id": &gateway_order.id,
        "razorpay_payment_id": "pay_456",
        "razorpay_signature": signature,
    })))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("signature"), "{body}");
}
