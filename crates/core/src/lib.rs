//! Shopkeep Core - Shared types library.
//!
//! This crate provides common types used across all Shopkeep components:
//! - `storefront` - Cart store, catalog, and checkout logic
//! - `cli` - Command-line front end for browsing, cart, and checkout
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, products,
//!   and checkout statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
