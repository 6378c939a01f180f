use thiserror::Error;

use crate::{
    db_types::{Address, NewAddress},
    objects::AddressUpdate,
};

#[derive(Debug, Clone, Error)]
pub enum AddressApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Address {0} not found")]
    AddressNotFound(i64),
    #[error("No fields to update")]
    UpdateNoOp,
}

impl From<sqlx::Error> for AddressApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

/// A per-user address book. Orders reference entries by id; deleting an entry never touches the orders that
/// used it.
#[allow(async_fn_in_trait)]
pub trait AddressBook: Clone {
    async fn insert_address(&self, address: NewAddress) -> Result<Address, AddressApiError>;

    async fn fetch_address(&self, address_id: i64) -> Result<Option<Address>, AddressApiError>;

    async fn fetch_addresses_for_user(&self, user_id: &str) -> Result<Vec<Address>, AddressApiError>;

    /// Applies a partial update. An empty update is rejected with [`AddressApiError::UpdateNoOp`].
    async fn update_address(&self, address_id: i64, update: AddressUpdate) -> Result<Address, AddressApiError>;

    async fn delete_address(&self, address_id: i64) -> Result<(), AddressApiError>;
}
