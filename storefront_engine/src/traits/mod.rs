//! Behaviour contracts for storefront database backends.
//!
//! * [`OrderFlow`] covers the checkout and cancellation flows, the only place where stock is mutated. Implementations
//!   MUST make both flows atomic: a failed checkout may not leave a partially created order, a decremented stock
//!   count, or a half-cleared cart behind.
//! * [`CartManagement`] covers the per-user staging area for prospective orders.
//! * [`PaymentManagement`] covers payment records and their status transitions.
//! * [`CatalogManagement`] covers stores, categories and products.
//! * [`AddressBook`] covers per-user delivery addresses.

mod address_book;
mod cart_management;
mod catalog_management;
mod order_flow;
mod payment_management;

pub use address_book::{AddressApiError, AddressBook};
pub use cart_management::{CartApiError, CartManagement};
pub use catalog_management::{CatalogApiError, CatalogManagement};
pub use order_flow::{OrderFlow, OrderFlowError};
pub use payment_management::{PaymentApiError, PaymentManagement};
