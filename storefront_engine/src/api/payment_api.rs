//! Unified API for payment records.

use std::fmt::Debug;

use crate::{
    db_types::{NewPayment, Payment, PaymentStatus},
    traits::{PaymentApiError, PaymentManagement},
};

/// The `PaymentApi` manages payment records and their lifecycle against orders.
pub struct PaymentApi<B> {
    db: B,
}

impl<B: Debug> Debug for PaymentApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentApi ({:?})", self.db)
    }
}

impl<B> PaymentApi<B>
where B: PaymentManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Records a payment against an order. An order carries at most one payment record; a second insert for the
    /// same order is rejected.
    pub async fn create_payment(&self, payment: NewPayment) -> Result<Payment, PaymentApiError> {
        self.db.insert_payment(payment).await
    }

    /// Sets the status on a payment record.
    pub async fn update_status(&self, payment_id: i64, status: PaymentStatus) -> Result<Payment, PaymentApiError> {
        self.db.update_payment_status(payment_id, status).await
    }

    pub async fn payment_by_id(&self, payment_id: i64) -> Result<Option<Payment>, PaymentApiError> {
        self.db.fetch_payment(payment_id).await
    }

    pub async fn payment_for_order(&self, order_id: i64) -> Result<Option<Payment>, PaymentApiError> {
        self.db.fetch_payment_for_order(order_id).await
    }
}
