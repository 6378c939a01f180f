//! Unified API for managing per-user shopping carts.

use std::fmt::Debug;

use crate::{
    objects::{CartItemWithProduct, CartTotal},
    traits::{CartApiError, CartManagement},
};

/// The `CartApi` provides a unified API for managing shopping carts.
pub struct CartApi<B> {
    db: B,
}

impl<B: Debug> Debug for CartApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CartApi ({:?})", self.db)
    }
}

impl<B> CartApi<B>
where B: CartManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Adds `quantity` units of a product to the user's cart.
    ///
    /// If the product is already in the cart, the quantities are merged into the existing row and the price
    /// captured when the row was first created is kept. Otherwise a new row is created with the product's current
    /// price as its snapshot.
    pub async fn add_item(
        &self,
        user_id: &str,
        product_id: i64,
        quantity: i64,
    ) -> Result<CartItemWithProduct, CartApiError> {
        self.db.upsert_cart_item(user_id, product_id, quantity).await
    }

    /// Replaces the quantity on a cart row. The price snapshot is untouched.
    pub async fn update_quantity(&self, cart_item_id: i64, quantity: i64) -> Result<CartItemWithProduct, CartApiError> {
        self.db.update_cart_item_quantity(cart_item_id, quantity).await
    }

    /// Removes a single row from a cart.
    pub async fn remove_item(&self, cart_item_id: i64) -> Result<(), CartApiError> {
        self.db.remove_cart_item(cart_item_id).await
    }

    /// Empties a user's cart, returning the number of rows removed.
    pub async fn clear_cart(&self, user_id: &str) -> Result<u64, CartApiError> {
        self.db.clear_cart(user_id).await
    }

    /// Fetches the user's cart, oldest rows first, with the product record attached to each row.
    pub async fn cart_items(&self, user_id: &str) -> Result<Vec<CartItemWithProduct>, CartApiError> {
        self.db.fetch_cart_items(user_id).await
    }

    /// The cart total at *current* product prices, along with the number of rows in the cart.
    pub async fn cart_total(&self, user_id: &str) -> Result<CartTotal, CartApiError> {
        self.db.cart_total(user_id).await
    }
}
