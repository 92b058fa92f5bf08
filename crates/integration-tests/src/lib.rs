//! Integration tests for Shopkeep.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopkeep-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart hydration and write-through against a real
//!   profile directory
//! - `checkout_flow` - Catalog to cart to order, as the CLI drives it
//!
//! Each test gets its own temporary profile directory via [`TestProfile`].

use std::fs;
use std::path::{Path, PathBuf};

use shopkeep_storefront::{CartStore, Catalog, FileStorage};
use tempfile::TempDir;

/// Storage key used by every fixture profile.
pub const CART_KEY: &str = "shopping-cart";

/// Product listing in the shape the mock product API returns. Prices are
/// JSON numbers here; the cart writes them back as decimal strings.
pub const SAMPLE_CATALOG: &str = r#"[
  {
    "id": "6708a7e1c2b3f4d5e6a7b8c1",
    "name": "Wireless Headphones",
    "price": 79.99,
    "image": "https://images.example.com/headphones.jpg",
    "description": "Over-ear, noise cancelling",
    "manufacturer": "Acme Audio",
    "product_category": {
      "id": "cat-audio",
      "name": "Audio",
      "created_at": "2024-10-01T10:00:00Z",
      "updated_at": "2024-10-01T10:00:00Z"
    },
    "created_at": "2024-10-11T09:30:00Z",
    "updated_at": "2024-10-11T09:30:00Z"
  },
  {
    "id": "6708a7e1c2b3f4d5e6a7b8c2",
    "name": "Desk Lamp",
    "price": 24.5,
    "manufacturer": "Brightside"
  },
  {
    "id": "6708a7e1c2b3f4d5e6a7b8c3",
    "name": "Notebook",
    "price": "4.25"
  }
]"#;

/// A temporary profile directory, removed on drop.
pub struct TestProfile {
    dir: TempDir,
}

impl TestProfile {
    /// Create an empty profile.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp profile"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.dir.path())
    }

    /// Hydrate a cart store from this profile, as a fresh session would.
    #[must_use]
    pub fn open_cart(&self) -> CartStore<FileStorage> {
        CartStore::with_key(self.storage(), CART_KEY)
    }

    /// Write a raw persisted cart value, bypassing the store.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn seed_cart(&self, raw: &str) {
        fs::write(self.dir.path().join(CART_KEY), raw).expect("Failed to seed cart");
    }

    /// The raw persisted cart value, if any.
    #[must_use]
    pub fn persisted_cart(&self) -> Option<String> {
        fs::read_to_string(self.dir.path().join(CART_KEY)).ok()
    }

    /// Write [`SAMPLE_CATALOG`] into the profile and return its path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[must_use]
    pub fn write_catalog(&self) -> PathBuf {
        let path = self.dir.path().join("products.json");
        fs::write(&path, SAMPLE_CATALOG).expect("Failed to write catalog");
        path
    }

    /// Load [`SAMPLE_CATALOG`] through the file path a CLI session uses.
    ///
    /// # Panics
    ///
    /// Panics if the catalog cannot be loaded.
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::load(&self.write_catalog()).expect("Failed to load sample catalog")
    }
}

impl Default for TestProfile {
    fn default() -> Self {
        Self::new()
    }
}
