//! Shopkeep Storefront library.
//!
//! Everything behind the storefront's screens, minus the screens:
//!
//! - [`cart`] - The persisted cart store and its consolidation rules
//! - [`storage`] - Key/value persistence backends (in-memory and file)
//! - [`catalog`] - Product lookup over a JSON product listing
//! - [`checkout`] - Form validation, order summary, and the step flow
//! - [`payment`] - Payment gateway seam with a simulated implementation
//! - [`config`] - Environment-driven configuration
//!
//! All operations are synchronous. A [`cart::CartStore`] is built once at the
//! application root and handed to whatever needs it; there is no global
//! state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod payment;
pub mod storage;

pub use cart::{CartLine, CartStore, consolidate};
pub use catalog::{Catalog, CatalogError};
pub use config::{ConfigError, PricingConfig, StorefrontConfig};
pub use error::{AppError, Result};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
