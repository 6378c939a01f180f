use sqlx::SqliteConnection;

use crate::db_types::{NewPayment, Payment, PaymentStatus};

pub async fn insert_payment(payment: NewPayment, conn: &mut SqliteConnection) -> Result<Payment, sqlx::Error> {
    let payment = sqlx::query_as(
        r#"
            INSERT INTO payments (order_id, amount, method)
            VALUES ($1, $2, $3)
            RETURNING *;
        "#,
    )
    .bind(payment.order_id)
    .bind(payment.amount)
    .bind(payment.method.to_string())
    .fetch_one(conn)
    .await?;
    Ok(payment)
}

pub async fn fetch_payment(payment_id: i64, conn: &mut SqliteConnection) -> Result<Option<Payment>, sqlx::Error> {
    let payment = sqlx::query_as("SELECT * FROM payments WHERE id = $1").bind(payment_id).fetch_optional(conn).await?;
    Ok(payment)
}

/// The payment attached to an order, if any. `payments.order_id` is unique, so there is at most one.
pub async fn fetch_payment_for_order(order_id: i64, conn: &mut SqliteConnection) -> Result<Option<Payment>, sqlx::Error> {
    let payment =
        sqlx::query_as("SELECT * FROM payments WHERE order_id = $1").bind(order_id).fetch_optional(conn).await?;
    Ok(payment)
}

/// Overwrites the payment status unconditionally, returning the updated row (or `None` if the payment does not
/// exist). Transition validity is the caller's concern.
pub async fn update_payment_status(
    payment_id: i64,
    status: PaymentStatus,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, sqlx::Error> {
    let payment =
        sqlx::query_as("UPDATE payments SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *")
            .bind(status.to_string())
            .bind(payment_id)
            .fetch_optional(conn)
            .await?;
    Ok(payment)
}
