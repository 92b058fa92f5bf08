//! Product catalog.
//!
//! Products are loaded from a JSON array shaped like the mock product API
//! responses. The catalog is read-only; the cart embeds snapshots of its
//! records rather than holding references into it.

use std::collections::HashMap;
use std::path::Path;

use shopkeep_core::{Product, ProductId};
use thiserror::Error;
use tracing::info;

/// Errors that can occur when loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a JSON array of products.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two records share an id.
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// A record has a price below zero.
    #[error("Negative price for product {0}")]
    NegativePrice(ProductId),
}

/// An indexed, ordered product listing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from already-parsed products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` or `CatalogError::NegativePrice`
    /// for the first offending record.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());

        for (position, product) in products.iter().enumerate() {
            if product.price.is_sign_negative() && !product.price.is_zero() {
                return Err(CatalogError::NegativePrice(product.id.clone()));
            }
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }

        Ok(Self { products, index })
    }

    /// Parse a catalog from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, or a validation error
    /// from [`Catalog::from_products`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or any error
    /// from [`Catalog::from_json`].
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!(path = %path.display(), products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).and_then(|&i| self.products.get(i))
    }

    /// Products in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Case-insensitive substring match on name, manufacturer, or category.
    ///
    /// A blank query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.products.iter().collect();
        }

        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.manufacturer.to_lowercase().contains(&needle)
                    || p
                        .category_name()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
            })
            .collect()
    }
}
