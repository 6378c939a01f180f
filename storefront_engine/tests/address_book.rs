mod support;

use storefront_engine::{
    db_types::{NewAddress, NewOrder, NewOrderItem},
    objects::AddressUpdate,
    AddressApiError,
    AddressBook,
    OrderFlow,
    OrderFlowError,
};
use support::seed_catalog;

fn home_address(user_id: &str) -> NewAddress {
    NewAddress::new(user_id, "Asha Rao", "+91-9000000001", "12 MG Road").with_locality(
        "Bengaluru",
        "Karnataka",
        "560001",
        "India",
    )
}

#[tokio::test]
async fn address_book_crud() {
    let seed = seed_catalog(0, 0).await;
    let db = &seed.db;
    let address = db.insert_address(home_address("asha")).await.unwrap();
    assert_eq!(address.user_id, "asha");
    assert_eq!(address.city, "Bengaluru");
    assert!(address.address_line2.is_none());

    let second = db.insert_address(home_address("asha")).await.unwrap();
    let book = db.fetch_addresses_for_user("asha").await.unwrap();
    assert_eq!(book.len(), 2);
    assert!(db.fetch_addresses_for_user("noone").await.unwrap().is_empty());

    let updated = db
        .update_address(address.id, AddressUpdate::default().with_pincode("560002").with_phone("+91-9000000002"))
        .await
        .unwrap();
    assert_eq!(updated.pincode, "560002");
    assert_eq!(updated.phone, "+91-9000000002");
    assert_eq!(updated.full_name, "Asha Rao", "Untouched fields must survive a partial update");

    let err = db.update_address(address.id, AddressUpdate::default()).await.expect_err("Empty update must fail");
    assert!(matches!(err, AddressApiError::UpdateNoOp));

    db.delete_address(second.id).await.unwrap();
    assert!(db.fetch_address(second.id).await.unwrap().is_none());
    let err = db.delete_address(second.id).await.expect_err("Deleting twice must fail");
    assert!(matches!(err, AddressApiError::AddressNotFound(id) if id == second.id));
}

#[tokio::test]
async fn orders_record_their_delivery_address() {
    let seed = seed_catalog(1, 5).await;
    let db = &seed.db;
    let address = db.insert_address(home_address("asha")).await.unwrap();
    let order = NewOrder::new("asha", seed.store_id, vec![NewOrderItem {
        product_id: seed.product_ids[0],
        quantity: 1,
    }])
    .with_address(address.id);
    let result = db.checkout(order).await.unwrap();
    assert_eq!(result.order.address_id, Some(address.id));
    assert_eq!(result.address.as_ref().unwrap().city, "Bengaluru");

    // The order survives the address being removed from the book.
    db.delete_address(address.id).await.unwrap();
    let stored = db.fetch_order_with_items(result.order.id).await.unwrap().unwrap();
    assert_eq!(stored.order.address_id, None);
    assert!(stored.address.is_none());

    // New orders cannot reference an address that is gone.
    let order = NewOrder::new("asha", seed.store_id, vec![NewOrderItem {
        product_id: seed.product_ids[0],
        quantity: 1,
    }])
    .with_address(address.id);
    let err = db.checkout(order).await.expect_err("Checkout with a deleted address must fail");
    assert!(matches!(err, OrderFlowError::AddressNotFound(id) if id == address.id));
}
