use std::fmt::Debug;

use log::*;

use crate::{
    db_types::NewOrder,
    objects::{OrderQueryFilter, OrderWithItems},
    traits::{OrderFlow, OrderFlowError},
};

/// `OrderFlowApi` is the primary API for the checkout and cancellation flows.
///
/// Checkout converts a set of order lines into a persisted order, decrementing stock for every line and clearing
/// the buyer's cart in the same transaction. Cancellation reverses the stock adjustments, flags any payment as
/// refunded and marks the order cancelled without deleting it.
pub struct OrderFlowApi<B> {
    db: B,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> OrderFlowApi<B>
where B: OrderFlow
{
    /// Submit a new order.
    ///
    /// Every line is checked against current stock. If any line cannot be fulfilled in full, the entire order is
    /// rejected and no stock is taken. The unit price recorded against each line is the price captured when the
    /// product was added to the buyer's cart, falling back to the live price for lines ordered directly.
    pub async fn checkout(&self, order: NewOrder) -> Result<OrderWithItems, OrderFlowError> {
        let user_id = order.user_id.clone();
        let result = self.db.checkout(order).await?;
        debug!("🔄️📦️ Checkout complete for {user_id}. Order #{} created", result.order.id);
        Ok(result)
    }

    /// Cancel an order, restoring stock for every line and refunding its payment record, if one exists.
    ///
    /// The order row survives with a `CANCELLED` status. Cancelling twice is an error.
    pub async fn cancel_order(&self, order_id: i64) -> Result<OrderWithItems, OrderFlowError> {
        let result = self.db.cancel_order(order_id).await?;
        debug!("🔄️📦️ Order #{order_id} cancelled");
        Ok(result)
    }

    /// Fetches an order together with its line items and payment record, if any.
    pub async fn order_with_items(&self, order_id: i64) -> Result<Option<OrderWithItems>, OrderFlowError> {
        self.db.fetch_order_with_items(order_id).await
    }

    /// Fetches orders according to the criteria in the [`OrderQueryFilter`], newest first.
    pub async fn search_orders(&self, query: OrderQueryFilter) -> Result<Vec<OrderWithItems>, OrderFlowError> {
        self.db.search_orders(query).await
    }
}
