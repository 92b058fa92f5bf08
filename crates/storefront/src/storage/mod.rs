//! Key/value persistence backends.
//!
//! The cart is mirrored into a single string slot, the same way a browser
//! keeps it in `localStorage`. Backends implement [`Storage`]; callers that
//! treat persistence as best-effort (the cart store) decide what to do with
//! the errors.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors that can occur when reading from or writing to a backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key contains characters the backend cannot store.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Underlying filesystem operation failed.
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// A string-keyed slot store.
///
/// `set_item` replaces any prior value under the same key. There is no
/// append or merge.
pub trait Storage {
    /// Read the value stored under `key`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid or the read fails.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid or the write fails.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid or the delete fails.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Check that a key is usable as a file name on every platform we target.
///
/// Allowed: ASCII alphanumerics, `-`, `_`, and `.` (not leading).
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}
