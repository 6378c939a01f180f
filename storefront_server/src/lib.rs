//! # Storefront server
//! This module hosts the HTTP surface for the storefront engine. It is responsible for:
//! Accepting catalog, cart, order and payment requests from clients.
//! Translating request bodies into engine API calls.
//! Verifying Razorpay payment signatures before payment records are touched.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The route list lives in [server](server/index.html), where the actix service tree is assembled. Every
//! handler is defined in [routes](routes/index.html).

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
