use thiserror::Error;

use crate::{
    db_types::NewOrder,
    objects::{OrderQueryFilter, OrderWithItems},
};

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Product {0} not found")]
    ProductNotFound(i64),
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock { product_id: i64, requested: i64, available: i64 },
    #[error("Invalid quantity: {0}. Quantities must be positive")]
    InvalidQuantity(i64),
    #[error("An order must contain at least one item")]
    EmptyOrder,
    #[error("Order {0} not found")]
    OrderNotFound(i64),
    #[error("Address {0} not found")]
    AddressNotFound(i64),
    #[error("Order {0} has already been cancelled")]
    OrderAlreadyCancelled(i64),
}

impl From<sqlx::Error> for OrderFlowError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

/// The checkout and cancellation contract. This is the only interface through which stock counts change.
#[allow(async_fn_in_trait)]
pub trait OrderFlow: Clone {
    /// Places an order in a single atomic transaction:
    /// * every line's stock is decremented with a conditional update that fails when fewer units remain than
    ///   requested (the whole order fails; there is no partial fulfilment),
    /// * unit prices come from the user's cart snapshot, falling back to the live product price,
    /// * a supplied delivery address must exist in the user's address book,
    /// * the order and its items are inserted with status `Pending`,
    /// * the user's cart is cleared.
    ///
    /// Two concurrent checkouts of the last unit of a product: exactly one succeeds.
    async fn checkout(&self, order: NewOrder) -> Result<OrderWithItems, OrderFlowError>;

    /// Cancels an order in a single atomic transaction: restores every line item's quantity to stock, marks an
    /// attached payment `Refunded`, and sets the order status to `Cancelled`. The row is retained.
    ///
    /// Cancelling an already-cancelled order is an error, so stock can never be restored twice.
    async fn cancel_order(&self, order_id: i64) -> Result<OrderWithItems, OrderFlowError>;

    /// Fetches an order with its items, address and payment. Returns `None` if the order does not exist.
    async fn fetch_order_with_items(&self, order_id: i64) -> Result<Option<OrderWithItems>, OrderFlowError>;

    /// Fetches orders matching the filter, newest first, each joined with items, address and payment.
    async fn search_orders(&self, query: OrderQueryFilter) -> Result<Vec<OrderWithItems>, OrderFlowError>;
}
