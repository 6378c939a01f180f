use actix_web::http::StatusCode;
use serde_json::json;
use storefront_engine::objects::{CartItemWithProduct, CartTotal};

use super::helpers::{delete, get, patch_json, post_json, seed_products, send, test_app, test_db};

#[actix_web::test]
async fn add_defaults_to_one_and_merges() {
    let db = test_db().await;
    let (_, products) = seed_products(&db, &[5000], 10).await;
    let app = test_app!(db);

    // No quantity in the body: defaults to 1
    let (status, body) =
        send(&app, post_json("/cart/add", &json!({ "user_id": "alice", "product_id": products[0] }))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let added: CartItemWithProduct = serde_json::from_str(&body).unwrap();
    assert_eq!(added.item.quantity, 1);

    let (_, body) = send(
        &app,
        post_json("/cart/add", &json!({ "user_id": "alice", "product_id": products[0], "quantity": 4 })),
    )
    .await;
    let merged: CartItemWithProduct = serde_json::from_str(&body).unwrap();
    assert_eq!(merged.item.id, added.item.id);
    assert_eq!(merged.item.quantity, 5);

    let (status, body) = send(&app, get("/cart/alice")).await;
    assert_eq!(status, StatusCode::OK);
    let cart: Vec<CartItemWithProduct> = serde_json::from_str(&body).unwrap();
    assert_eq!(cart.len(), 1);
}

#[actix_web::test]
async fn cart_total_reflects_live_prices() {
    let db = test_db().await;
    let (_, products) = seed_products(&db, &[5000, 10_000], 10).await;
    let app = test_app!(db);

    for (product_id, quantity) in [(products[0], 2), (products[1], 1)] {
        send(&app, post_json("/cart/add", &json!({ "user_id": "bob", "product_id": product_id, "quantity": quantity })))
            .await;
    }
    let (status, body) = send(&app, get("/cart/bob/total")).await;
    assert_eq!(status, StatusCode::OK);
    let total: CartTotal = serde_json::from_str(&body).unwrap();
    assert_eq!(total.item_count, 2);
    assert_eq!(total.total.value(), 20_000);

    let (status, _) = send(&app, patch_json(&format!("/product/{}", products[0]), &json!({ "price": 6000 }))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, get("/cart/bob/total")).await;
    let total: CartTotal = serde_json::from_str(&body).unwrap();
    assert_eq!(total.total.value(), 22_000);
}

#[actix_web::test]
async fn update_remove_and_clear() {
    let db = test_db().await;
    let (_, products) = seed_products(&db, &[5000, 10_000], 10).await;
    let app = test_app!(db);

    let (_, body) =
        send(&app, post_json("/cart/add", &json!({ "user_id": "carol", "product_id": products[0], "quantity": 2 })))
            .await;
    let first: CartItemWithProduct = serde_json::from_str(&body).unwrap();
    send(&app, post_json("/cart/add", &json!({ "user_id": "carol", "product_id": products[1], "quantity": 1 }))).await;

    let (status, body) = send(&app, patch_json(&format!("/cart/{}", first.item.id), &json!({ "quantity": 7 }))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let updated: CartItemWithProduct = serde_json::from_str(&body).unwrap();
    assert_eq!(updated.item.quantity, 7);

    let (status, _) = send(&app, delete(&format!("/cart/{}", first.item.id))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, delete(&format!("/cart/{}", first.item.id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, delete("/cart/clear/carol")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, get("/cart/carol")).await;
    assert_eq!(body, "[]");
}

#[actix_web::test]
async fn quantity_and_stock_rules_map_to_400() {
    let db = test_db().await;
    let (_, products) = seed_products(&db, &[5000], 3).await;
    let app = test_app!(db);

    let (status, body) = send(
        &app,
        post_json("/cart/add", &json!({ "user_id": "dan", "product_id": products[0], "quantity": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid quantity"), "{body}");

    let (status, body) = send(
        &app,
        post_json("/cart/add", &json!({ "user_id": "dan", "product_id": products[0], "quantity": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Insufficient stock"), "{body}");

    let (status, _) =
        send(&app, post_json("/cart/add", &json!({ "user_id": "dan", "product_id": 999, "quantity": 1 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
