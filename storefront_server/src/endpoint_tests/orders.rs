use actix_web::http::StatusCode;
use serde_json::json;
use storefront_engine::{
    db_types::{OrderStatus, Product},
    objects::OrderWithItems,
};

use super::helpers::{delete, get, post_json, seed_products, send, test_app, test_db};
use crate::data_objects::CreateOrderRequest;

fn order_body(user_id: &str, store_id: i64, product_id: i64, quantity: i64) -> CreateOrderRequest {
    serde_json::from_value(json!({
        "user_id": user_id,
        "store_id": store_id,
        "items": [{ "product_id": product_id, "quantity": quantity }],
    }))
    .unwrap()
}

#[actix_web::test]
async fn checkout_decrements_stock_and_clears_cart() {
    let db = test_db().await;
    let (store_id, products) = seed_products(&db, &[5000], 10).await;
    let app = test_app!(db);

    let (status, _) = send(&app, post_json("/cart/add", &json!({
        "user_id": "alice", "product_id": products[0], "quantity": 3
    })))
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, post_json("/order", &order_body("alice", store_id, products[0], 3))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let order: OrderWithItems = serde_json::from_str(&body).unwrap();
    assert_eq!(order.order.status, OrderStatus::Pending);
    assert_eq!(order.order.total_amount.value(), 15_000);

    let (status, body) = send(&app, get(&format!("/product/{}", products[0]))).await;
    assert_eq!(status, StatusCode::OK);
    let product: Product = serde_json::from_str(&body).unwrap();
    assert_eq!(product.stock, 7);

    let (status, body) = send(&app, get("/cart/alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]", "Checkout must clear the cart");
}

#[actix_web::test]
async fn oversized_order_is_a_400_and_takes_nothing() {
    let db = test_db().await;
    let (store_id, products) = seed_products(&db, &[5000], 2).await;
    let app = test_app!(db);

    let (status, body) = send(&app, post_json("/order", &order_body("bob", store_id, products[0], 3))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Insufficient stock"), "{body}");

    let (_, body) = send(&app, get(&format!("/product/{}", products[0]))).await;
    let product: Product = serde_json::from_str(&body).unwrap();
    assert_eq!(product.stock, 2);
}

#[actix_web::test]
async fn cancel_restocks_and_is_not_repeatable() {
    let db = test_db().await;
    let (store_id, products) = seed_products(&db, &[5000], 10).await;
    let app = test_app!(db);

    let (_, body) = send(&app, post_json("/order", &order_body("carol", store_id, products[0], 4))).await;
    let order: OrderWithItems = serde_json::from_str(&body).unwrap();

    let (status, body) = send(&app, delete(&format!("/order/{}", order.order.id))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let cancelled: OrderWithItems = serde_json::from_str(&body).unwrap();
    assert_eq!(cancelled.order.status, OrderStatus::Cancelled);

    let (_, body) = send(&app, get(&format!("/product/{}", products[0]))).await;
    let product: Product = serde_json::from_str(&body).unwrap();
    assert_eq!(product.stock, 10);

    let (status, body) = send(&app, delete(&format!("/order/{}", order.order.id))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("already been cancelled"), "{body}");

    // Soft cancel: the row is still fetchable
    let (status, _) = send(&app, get(&format!("/order/{}", order.order.id))).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn order_listings_by_user_and_store() {
    let db = test_db().await;
    let (store_id, products) = seed_products(&db, &[5000], 20).await;
    let app = test_app!(db);

    for user in ["dan", "dan", "erin"] {
        let (status, _) = send(&app, post_json("/order", &order_body(user, store_id, products[0], 1))).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, body) = send(&app, get("/order/user/dan")).await;
    assert_eq!(status, StatusCode::OK);
    let orders: Vec<OrderWithItems> = serde_json::from_str(&body).unwrap();
    assert_eq!(orders.len(), 2);

    let (status, body) = send(&app, get(&format!("/order/store/{store_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let orders: Vec<OrderWithItems> = serde_json::from_str(&body).unwrap();
    assert_eq!(orders.len(), 3);
}

#[actix_web::test]
async fn unknown_order_is_a_404() {
    let db = test_db().await;
    let app = test_app!(db);
    let (status, body) = send(&app, get("/order/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("error"), "{body}");
}
