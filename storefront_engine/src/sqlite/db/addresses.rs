use log::trace;
use sqlx::{sqlite::SqliteRow, FromRow, QueryBuilder, SqliteConnection};

use crate::{
    db_types::{Address, NewAddress},
    objects::AddressUpdate,
    traits::AddressApiError,
};

pub async fn insert_address(address: NewAddress, conn: &mut SqliteConnection) -> Result<Address, sqlx::Error> {
    let address = sqlx::query_as(
        r#"
            INSERT INTO addresses (user_id, full_name, phone, address_line1, address_line2, city, state, pincode,
                                   country)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *;
        "#,
    )
    .bind(address.user_id)
    .bind(address.full_name)
    .bind(address.phone)
    .bind(address.address_line1)
    .bind(address.address_line2)
    .bind(address.city)
    .bind(address.state)
    .bind(address.pincode)
    .bind(address.country)
    .fetch_one(conn)
    .await?;
    Ok(address)
}

pub async fn fetch_address(address_id: i64, conn: &mut SqliteConnection) -> Result<Option<Address>, sqlx::Error> {
    let address =
        sqlx::query_as("SELECT * FROM addresses WHERE id = $1").bind(address_id).fetch_optional(conn).await?;
    Ok(address)
}

/// Addresses for a user, newest first.
pub async fn addresses_for_user(user_id: &str, conn: &mut SqliteConnection) -> Result<Vec<Address>, sqlx::Error> {
    let addresses = sqlx::query_as("SELECT * FROM addresses WHERE user_id = $1 ORDER BY created_at DESC")
        .bind(user_id)
        .fetch_all(conn)
        .await?;
    Ok(addresses)
}

pub async fn update_address(
    address_id: i64,
    update: AddressUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<Address>, AddressApiError> {
    if update.is_empty() {
        return Err(AddressApiError::UpdateNoOp);
    }
    let mut builder = QueryBuilder::new("UPDATE addresses SET updated_at = CURRENT_TIMESTAMP, ");
    let mut set_clause = builder.separated(", ");
    if let Some(full_name) = update.full_name {
        set_clause.push("full_name = ");
        set_clause.push_bind_unseparated(full_name);
    }
    if let Some(phone) = update.phone {
        set_clause.push("phone = ");
        set_clause.push_bind_unseparated(phone);
    }
    if let Some(line) = update.address_line1 {
        set_clause.push("address_line1 = ");
        set_clause.push_bind_unseparated(line);
    }
    if let Some(line) = update.address_line2 {
        set_clause.push("address_line2 = ");
        set_clause.push_bind_unseparated(line);
    }
    if let Some(city) = update.city {
        set_clause.push("city = ");
        set_clause.push_bind_unseparated(city);
    }
    if let Some(state) = update.state {
        set_clause.push("state = ");
        set_clause.push_bind_unseparated(state);
    }
    if let Some(pincode) = update.pincode {
        set_clause.push("pincode = ");
        set_clause.push_bind_unseparated(pincode);
    }
    if let Some(country) = update.country {
        set_clause.push("country = ");
        set_clause.push_bind_unseparated(country);
    }
    builder.push(" WHERE id = ");
    builder.push_bind(address_id);
    builder.push(" RETURNING *");
    trace!("📮️ Executing query: {}", builder.sql());
    let address =
        builder.build().fetch_optional(conn).await?.map(|row: SqliteRow| Address::from_row(&row)).transpose()?;
    Ok(address)
}

/// Returns the number of deleted rows (0 if the address did not exist).
pub async fn delete_address(address_id: i64, conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM addresses WHERE id = $1").bind(address_id).execute(conn).await?;
    Ok(result.rows_affected())
}
