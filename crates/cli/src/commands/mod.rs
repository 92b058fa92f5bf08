//! Command implementations.
//!
//! Output is emitted as `info!` events so `--json` yields one structured
//! record per line.

pub mod cart;
pub mod checkout;
pub mod products;

use shopkeep_storefront::{AppError, CartStore, Catalog, FileStorage, StorefrontConfig};

/// Per-invocation state: configuration plus the hydrated cart.
///
/// The catalog is loaded lazily since most cart commands never touch it.
pub struct Session {
    pub config: StorefrontConfig,
    pub cart: CartStore<FileStorage>,
}

impl Session {
    /// Hydrate the cart from the configured profile directory.
    pub fn open(config: StorefrontConfig) -> Self {
        let storage = FileStorage::new(&config.data_dir);
        let cart = CartStore::with_key(storage, config.cart_key.clone());
        Self { config, cart }
    }

    /// Load the product listing named by `SHOPKEEP_CATALOG_PATH`.
    pub fn catalog(&self) -> Result<Catalog, AppError> {
        let path = self.config.catalog_path.as_deref().ok_or_else(|| {
            AppError::BadRequest("SHOPKEEP_CATALOG_PATH is not set".to_string())
        })?;
        Ok(Catalog::load(path)?)
    }
}
