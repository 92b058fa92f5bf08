//! Unified error handling.
//!
//! Provides a unified `AppError` type for the operations a front end drives
//! (loading the catalog, reading configuration, submitting an order). Cart
//! mutations never fail outward; storage errors there are logged and the
//! in-memory cart stays authoritative.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Order submission failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Process exit code for a command that failed with this error.
    ///
    /// Follows the BSD `sysexits.h` conventions.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Storage(_) | Self::Catalog(CatalogError::Io { .. }) => 74,
            Self::Catalog(_) => 65,
            Self::Config(_) => 78,
            Self::Checkout(CheckoutError::PaymentDeclined) => 69,
            Self::Checkout(_) | Self::BadRequest(_) => 64,
            Self::NotFound(_) => 66,
        }
    }

    /// Message safe to show to a shopper.
    ///
    /// Storage details stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Storage(_) => "Could not access saved data".to_string(),
            Self::Checkout(err) => err.to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
