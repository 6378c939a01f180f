//! # Storefront engine public API
//!
//! The `api` module exposes the programmatic API for the storefront engine.
//! The API is modular, so that clients of the API can pick and choose the functionality they want, or split
//! responsibilities (e.g. catalog administration and order flow) across different services.
//!
//! * [`cart_api`] provides methods for managing per-user shopping carts, including the price-at-add snapshot rules.
//! * [`order_flow_api`] is the primary API for the checkout and cancellation flows. Stock adjustments, order
//!   creation and cart clearing are all-or-nothing.
//! * [`payment_api`] manages payment records and their lifecycle against orders.
//! * [`catalog_api`] provides store, category and product administration.
//! * [`address_api`] manages per-user delivery addresses.
//!
//! # API usage
//!
//! The pattern for using all the APIs is the same. An API instance is created by supplying a database backend that
//! implements the specific backend traits required by the API.

pub mod address_api;
pub mod cart_api;
pub mod catalog_api;
pub mod order_flow_api;
pub mod payment_api;
