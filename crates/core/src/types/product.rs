//! Catalog product records.
//!
//! The cart embeds a snapshot of a [`Product`] at the time it is added, so
//! these types double as the persisted cart line payload.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};

/// A product as supplied by the catalog.
///
/// Only `id`, `name`, `price`, and `image` matter to the cart. The remaining
/// metadata is carried along so snapshots round-trip without loss, and
/// defaults when a record omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable, unique catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price. Accepts JSON numbers or decimal strings.
    pub price: Decimal,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub product_category: Option<ProductCategory>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Product {
    /// Create a product with only the fields the cart relies on.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
            description: String::new(),
            manufacturer: String::new(),
            product_category: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Attach an image URL.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Category name, if the product is categorised.
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.product_category.as_ref().map(|c| c.name.as_str())
    }
}

/// Category a product belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
