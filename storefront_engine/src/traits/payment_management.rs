use thiserror::Error;

use crate::db_types::{NewPayment, Payment, PaymentStatus};

#[derive(Debug, Clone, Error)]
pub enum PaymentApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order {0} not found")]
    OrderNotFound(i64),
    #[error("Payment {0} not found")]
    PaymentNotFound(i64),
    #[error("A payment already exists for order {0}")]
    PaymentAlreadyExists(i64),
}

impl From<sqlx::Error> for PaymentApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

#[allow(async_fn_in_trait)]
pub trait PaymentManagement: Clone {
    /// Records a payment attempt against an order. The order must exist and must not already have a payment.
    /// Every payment starts as `Pending`, including cash on delivery.
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, PaymentApiError>;

    /// Overwrites a payment's status and returns the updated row. No transition checks are applied; callers are
    /// trusted back-office flows and gateway callbacks.
    async fn update_payment_status(&self, payment_id: i64, status: PaymentStatus) -> Result<Payment, PaymentApiError>;

    async fn fetch_payment(&self, payment_id: i64) -> Result<Option<Payment>, PaymentApiError>;

    /// The payment attached to an order, if any. Payments own the link; orders carry no payment column.
    async fn fetch_payment_for_order(&self, order_id: i64) -> Result<Option<Payment>, PaymentApiError>;
}
