use thiserror::Error;

use crate::objects::{CartItemWithProduct, CartTotal};

#[derive(Debug, Clone, Error)]
pub enum CartApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Product {0} not found")]
    ProductNotFound(i64),
    #[error("Cart item {0} not found")]
    CartItemNotFound(i64),
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock { product_id: i64, requested: i64, available: i64 },
    #[error("Invalid quantity: {0}. Use remove to take an item out of the cart")]
    InvalidQuantity(i64),
}

impl From<sqlx::Error> for CartApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

#[allow(async_fn_in_trait)]
pub trait CartManagement: Clone {
    /// Adds `quantity` units of a product to the user's cart. An existing row for `(user_id, product_id)` has its
    /// quantity merged and keeps its original price snapshot; a new row snapshots the current product price.
    /// The incoming quantity must not exceed the product's current stock.
    async fn upsert_cart_item(
        &self,
        user_id: &str,
        product_id: i64,
        quantity: i64,
    ) -> Result<CartItemWithProduct, CartApiError>;

    /// Replaces a cart row's quantity. Rejects non-positive quantities and quantities above the product's stock.
    async fn update_cart_item_quantity(
        &self,
        cart_item_id: i64,
        quantity: i64,
    ) -> Result<CartItemWithProduct, CartApiError>;

    /// Removes a single cart row.
    async fn remove_cart_item(&self, cart_item_id: i64) -> Result<(), CartApiError>;

    /// Deletes all cart rows for the user, returning the number removed.
    async fn clear_cart(&self, user_id: &str) -> Result<u64, CartApiError>;

    /// All cart rows for the user, each joined with its product.
    async fn fetch_cart_items(&self, user_id: &str) -> Result<Vec<CartItemWithProduct>, CartApiError>;

    /// The live cart value: Σ current product price × quantity, plus the row count.
    async fn cart_total(&self, user_id: &str) -> Result<CartTotal, CartApiError>;
}
