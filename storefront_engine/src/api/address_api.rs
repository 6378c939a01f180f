//! API for managing per-user delivery addresses.

use std::fmt::Debug;

use crate::{
    db_types::{Address, NewAddress},
    objects::AddressUpdate,
    traits::{AddressApiError, AddressBook},
};

/// The `AddressApi` provides address-book management. Orders reference addresses by id at checkout.
pub struct AddressApi<B> {
    db: B,
}

impl<B: Debug> Debug for AddressApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AddressApi ({:?})", self.db)
    }
}

impl<B> AddressApi<B>
where B: AddressBook
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn create_address(&self, address: NewAddress) -> Result<Address, AddressApiError> {
        self.db.insert_address(address).await
    }

    pub async fn address_by_id(&self, address_id: i64) -> Result<Option<Address>, AddressApiError> {
        self.db.fetch_address(address_id).await
    }

    /// Fetches a user's address book, newest first.
    pub async fn addresses_for_user(&self, user_id: &str) -> Result<Vec<Address>, AddressApiError> {
        self.db.fetch_addresses_for_user(user_id).await
    }

    /// Applies a partial update to an address. An empty update is an error rather than a silent no-op.
    pub async fn update_address(&self, address_id: i64, update: AddressUpdate) -> Result<Address, AddressApiError> {
        self.db.update_address(address_id, update).await
    }

    pub async fn delete_address(&self, address_id: i64) -> Result<(), AddressApiError> {
        self.db.delete_address(address_id).await
    }
}
