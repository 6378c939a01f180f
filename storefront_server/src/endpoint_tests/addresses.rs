use actix_web::http::StatusCode;
use serde_json::json;
use storefront_engine::{db_types::Address, objects::OrderWithItems};

use super::helpers::{delete, get, patch_json, post_json, seed_products, send, test_app, test_db};

fn address_body(user_id: &str) -> serde_json::Value {
    json!({
        "user_id": user_id,
        "full_name": "Asha Rao",
        "phone": "+91-9000000001",
        "address_line1": "12 MG Road",
        "address_line2": null,
        "city": "Bengaluru",
        "state": "Karnataka",
        "pincode": "560001",
        "country": "India"
    })
}

#[actix_web::test]
async fn address_crud_round_trip() {
    let db = test_db().await;
    let app = test_app!(db);

    let (status, body) = send(&app, post_json("/address", &address_body("asha"))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let address: Address = serde_json::from_str(&body).unwrap();
    assert_eq!(address.city, "Bengaluru");

    send(&app, post_json("/address", &address_body("asha"))).await;
    let (status, body) = send(&app, get("/address/user/asha")).await;
    assert_eq!(status, StatusCode::OK);
    let book: Vec<Address> = serde_json::from_str(&body).unwrap();
    assert_eq!(book.len(), 2);

    let (status, body) =
        send(&app, patch_json(&format!("/address/{}", address.id), &json!({ "pincode": "560002" }))).await;
    assert_eq!(status, StatusCode::OK);
    let updated: Address = serde_json::from_str(&body).unwrap();
    assert_eq!(updated.pincode, "560002");
    assert_eq!(updated.full_name, "Asha Rao");

    // An empty patch is rejected rather than silently ignored.
    let (status, _) = send(&app, patch_json(&format!("/address/{}", address.id), &json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, delete(&format!("/address/{}", address.id))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, get(&format!("/address/{}", address.id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, delete(&format!("/address/{}", address.id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn orders_carry_their_address() {
    let db = test_db().await;
    let (store_id, products) = seed_products(&db, &[5000], 5).await;
    let app = test_app!(db);

    let (_, body) = send(&app, post_json("/address", &address_body("asha"))).await;
    let address: Address = serde_json::from_str(&body).unwrap();

    let order_body = json!({
        "user_id": "asha",
        "store_id": store_id,
        "items": [{ "product_id": products[0], "quantity": 1 }],
        "address_id": address.id,
    });
    let (status, body) = send(&app, post_json("/order", &order_body)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let order: OrderWithItems = serde_json::from_str(&body).unwrap();
    assert_eq!(order.order.address_id, Some(address.id));

    let (_, body) = send(&app, get(&format!("/order/{}", order.order.id))).await;
    let stored: OrderWithItems = serde_json::from_str(&body).unwrap();
    assert_eq!(stored.order.address_id, Some(address.id));
    assert_eq!(stored.address.unwrap().pincode, "560001");
}
