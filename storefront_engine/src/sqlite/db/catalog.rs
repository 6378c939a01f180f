use sqlx::SqliteConnection;

use crate::db_types::{Category, NewCategory, NewStore, Store};

pub async fn insert_store(store: NewStore, conn: &mut SqliteConnection) -> Result<Store, sqlx::Error> {
    let store = sqlx::query_as(
        r#"
            INSERT INTO stores (name, owner_id) VALUES ($1, $2)
            RETURNING *;
        "#,
    )
    .bind(store.name)
    .bind(store.owner_id)
    .fetch_one(conn)
    .await?;
    Ok(store)
}

pub async fn fetch_store(store_id: i64, conn: &mut SqliteConnection) -> Result<Option<Store>, sqlx::Error> {
    let store = sqlx::query_as("SELECT * FROM stores WHERE id = $1").bind(store_id).fetch_optional(conn).await?;
    Ok(store)
}

pub async fn insert_category(category: NewCategory, conn: &mut SqliteConnection) -> Result<Category, sqlx::Error> {
    let category = sqlx::query_as(
        r#"
            INSERT INTO categories (store_id, name) VALUES ($1, $2)
            RETURNING *;
        "#,
    )
    .bind(category.store_id)
    .bind(category.name)
    .fetch_one(conn)
    .await?;
    Ok(category)
}

pub async fn fetch_category(category_id: i64, conn: &mut SqliteConnection) -> Result<Option<Category>, sqlx::Error> {
    let category =
        sqlx::query_as("SELECT * FROM categories WHERE id = $1").bind(category_id).fetch_optional(conn).await?;
    Ok(category)
}

/// Categories for a store, in creation order.
pub async fn categories_for_store(store_id: i64, conn: &mut SqliteConnection) -> Result<Vec<Category>, sqlx::Error> {
    let categories = sqlx::query_as("SELECT * FROM categories WHERE store_id = $1 ORDER BY created_at ASC")
        .bind(store_id)
        .fetch_all(conn)
        .await?;
    Ok(categories)
}
