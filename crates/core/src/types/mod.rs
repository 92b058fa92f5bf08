//! Core types for Shopkeep.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price, UnknownCurrency};
pub use product::{Product, ProductCategory};
pub use status::*;
