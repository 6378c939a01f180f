//! Storefront Engine
//!
//! The storefront engine holds the core logic for a multi-tenant storefront backend: catalogs, shopping carts,
//! the checkout and cancellation flows, and payment records. It is transport-agnostic.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@sqlite`]). You should never need to access the database directly.
//!    Instead, use the public API provided by the engine. The exception is the data types used in the database.
//!    These are defined in the [`mod@db_types`] module and are public.
//! 2. The engine public API ([`mod@api`]). This provides the public-facing functionality of the engine. It is
//!    responsible for managing catalogs, carts, orders and payments. Specific backends need to implement the
//!    traits in [`mod@traits`] in order to act as a backend for the storefront server.
//!
//! The rules that keep stock, orders and payments consistent live in the backend implementations: checkout and
//! cancellation each run as a single transaction, stock can never be driven negative, and an order owns at most
//! one payment record.

pub mod api;
pub mod db_types;
pub mod objects;
pub mod sqlite;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use api::{
    address_api::AddressApi,
    cart_api::CartApi,
    catalog_api::CatalogApi,
    order_flow_api::OrderFlowApi,
    payment_api::PaymentApi,
};
pub use sqlite::SqliteDatabase;
pub use traits::{
    AddressApiError,
    AddressBook,
    CartApiError,
    CartManagement,
    CatalogApiError,
    CatalogManagement,
    OrderFlow,
    OrderFlowError,
    PaymentApiError,
    PaymentManagement,
};
