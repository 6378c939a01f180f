use sf_common::Money;
use sqlx::SqliteConnection;

use crate::{db_types::CartItem, objects::CartTotal};

pub async fn fetch_cart_item(cart_item_id: i64, conn: &mut SqliteConnection) -> Result<Option<CartItem>, sqlx::Error> {
    let item = sqlx::query_as("SELECT * FROM cart_items WHERE id = $1").bind(cart_item_id).fetch_optional(conn).await?;
    Ok(item)
}

/// The cart row for a `(user, product)` pair, if one exists. At most one row can exist per pair.
pub async fn fetch_cart_item_for_product(
    user_id: &str,
    product_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<CartItem>, sqlx::Error> {
    let item = sqlx::query_as("SELECT * FROM cart_items WHERE user_id = $1 AND product_id = $2")
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(conn)
        .await?;
    Ok(item)
}

/// Inserts a new cart row with the price snapshot taken from the product at add time.
pub async fn insert_cart_item(
    user_id: &str,
    product_id: i64,
    quantity: i64,
    unit_price: Money,
    conn: &mut SqliteConnection,
) -> Result<CartItem, sqlx::Error> {
    let item = sqlx::query_as(
        r#"
            INSERT INTO cart_items (user_id, product_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .bind(unit_price)
    .fetch_one(conn)
    .await?;
    Ok(item)
}

/// Replaces a row's quantity. The price snapshot is deliberately left untouched.
pub async fn set_quantity(
    cart_item_id: i64,
    quantity: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<CartItem>, sqlx::Error> {
    let item = sqlx::query_as(
        "UPDATE cart_items SET quantity = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *",
    )
    .bind(quantity)
    .bind(cart_item_id)
    .fetch_optional(conn)
    .await?;
    Ok(item)
}

pub async fn delete_cart_item(cart_item_id: i64, conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = $1").bind(cart_item_id).execute(conn).await?;
    Ok(result.rows_affected())
}

pub async fn clear_cart(user_id: &str, conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1").bind(user_id).execute(conn).await?;
    Ok(result.rows_affected())
}

pub async fn cart_items_for_user(user_id: &str, conn: &mut SqliteConnection) -> Result<Vec<CartItem>, sqlx::Error> {
    let items = sqlx::query_as("SELECT * FROM cart_items WHERE user_id = $1 ORDER BY created_at ASC")
        .bind(user_id)
        .fetch_all(conn)
        .await?;
    Ok(items)
}

/// The live value of the cart: Σ current product price × quantity. The snapshot price only enters at checkout.
pub async fn live_cart_total(user_id: &str, conn: &mut SqliteConnection) -> Result<CartTotal, sqlx::Error> {
    let (total, item_count): (i64, i64) = sqlx::query_as(
        r#"
            SELECT COALESCE(SUM(products.price * cart_items.quantity), 0), COUNT(cart_items.id)
            FROM cart_items JOIN products ON cart_items.product_id = products.id
            WHERE cart_items.user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(conn)
    .await?;
    Ok(CartTotal { total: Money::from(total), item_count })
}
