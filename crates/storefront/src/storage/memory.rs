//! In-memory storage backend.

use std::collections::HashMap;

use super::{Storage, StorageError, validate_key};

/// A `HashMap`-backed store that lives as long as the process.
///
/// Useful for ephemeral sessions and for observing exactly what the cart
/// store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a single value.
    #[must_use]
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut items = HashMap::new();
        items.insert(key.into(), value.into());
        Self { items }
    }

    /// Borrow the raw value under `key` without validation.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("cart").unwrap(), None);

        storage.set_item("cart", "[]").unwrap();
        assert_eq!(storage.get_item("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_overwrites() {
        let mut storage = MemoryStorage::with_item("cart", "old");
        storage.set_item("cart", "new").unwrap();
        assert_eq!(storage.peek("cart"), Some("new"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_ok() {
        let mut storage = MemoryStorage::new();
        storage.remove_item("cart").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_invalid_key_rejected() {
        let mut storage = MemoryStorage::new();
        assert!(storage.set_item("../cart", "[]").is_err());
    }
}
