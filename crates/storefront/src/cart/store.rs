//! The persisted cart store.

use rust_decimal::Decimal;
use shopkeep_core::{Product, ProductId};
use tracing::{debug, info, warn};

use super::line::{CartLine, consolidate, subtotal, total_quantity};
use super::snapshot::{self, Snapshot};
use crate::storage::Storage;

/// Storage key the cart is mirrored under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "shopping-cart";

/// Authoritative cart state for one profile.
///
/// Every mutation updates the in-memory lines and then synchronously writes
/// the full list to `storage`. Storage failures are logged and otherwise
/// ignored: the in-memory cart stays correct for the rest of the session.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    lines: Vec<CartLine>,
    total_quantity: u64,
    is_open: bool,
}

impl<S: Storage> CartStore<S> {
    /// Hydrate a store from `storage` under [`DEFAULT_CART_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY)
    }

    /// Hydrate a store from `storage` under `key`.
    ///
    /// Absent, unreadable, or malformed values yield an empty cart. A value
    /// containing any legacy numeric-id entry is discarded and the empty cart
    /// is written back. Otherwise lines with a negative price are dropped,
    /// duplicates consolidated, zero-quantity lines dropped, and the cleaned
    /// list written back if anything changed.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            lines: Vec::new(),
            total_quantity: 0,
            is_open: false,
        };
        store.hydrate();
        store
    }

    fn hydrate(&mut self) {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No persisted cart, starting empty");
                return;
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read persisted cart, starting empty");
                return;
            }
        };

        match snapshot::decode(&raw) {
            Snapshot::Lines(loaded) => {
                let priced: Vec<CartLine> = loaded
                    .iter()
                    .filter(|line| line.product.price >= Decimal::ZERO)
                    .cloned()
                    .collect();
                let cleaned: Vec<CartLine> = consolidate(priced)
                    .into_iter()
                    .filter(|line| line.quantity > 0)
                    .collect();

                if cleaned == loaded {
                    self.set_lines(loaded);
                } else {
                    info!(
                        key = %self.key,
                        before = loaded.len(),
                        after = cleaned.len(),
                        "Cleaned persisted cart lines"
                    );
                    self.commit(cleaned);
                }
            }
            Snapshot::Legacy => {
                info!(
                    key = %self.key,
                    "Cart data format updated - clearing legacy cart items for compatibility"
                );
                self.commit(Vec::new());
            }
            Snapshot::Unparsable(reason) => {
                warn!(key = %self.key, %reason, "Persisted cart is malformed, starting empty");
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Quantity of `product_id` in the cart, or 0 when absent.
    #[must_use]
    pub fn get_quantity(&self, product_id: &ProductId) -> u32 {
        self.find(product_id).map_or(0, |line| line.quantity)
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn find(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == product_id)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of quantities across all lines, for badge counts.
    #[must_use]
    pub const fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    /// Sum of each line's price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        subtotal(&self.lines)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Storage key the cart is mirrored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store and return its storage.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `product`.
    ///
    /// A new line embeds a clone of `product`. An existing line keeps the
    /// snapshot it was created with and only its quantity changes.
    pub fn increase(&mut self, product: &Product) {
        let mut lines = consolidate(std::mem::take(&mut self.lines));

        match lines.iter_mut().find(|line| line.product_id() == &product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => lines.push(CartLine::new(product.clone())),
        }

        debug!(product_id = %product.id, "Increased cart quantity");
        self.commit(lines);
    }

    /// Remove one unit of `product_id`, dropping the line at quantity 1.
    ///
    /// Unknown ids leave the lines unchanged; the cart is still written back.
    pub fn decrease(&mut self, product_id: &ProductId) {
        let mut lines = consolidate(std::mem::take(&mut self.lines));

        if let Some(index) = lines.iter().position(|line| line.product_id() == product_id) {
            let remove = lines.get(index).is_some_and(|line| line.quantity <= 1);
            if remove {
                lines.remove(index);
            } else if let Some(line) = lines.get_mut(index) {
                line.quantity -= 1;
            }
        }

        debug!(%product_id, "Decreased cart quantity");
        self.commit(lines);
    }

    /// Drop the line for `product_id` regardless of quantity.
    pub fn remove(&mut self, product_id: &ProductId) {
        let mut lines = std::mem::take(&mut self.lines);
        lines.retain(|line| line.product_id() != product_id);

        debug!(%product_id, "Removed product from cart");
        self.commit(lines);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        debug!(key = %self.key, "Cleared cart");
        self.commit(Vec::new());
    }

    // =========================================================================
    // Drawer
    // =========================================================================

    pub const fn open(&mut self) {
        self.is_open = true;
    }

    pub const fn close(&mut self) {
        self.is_open = false;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn set_lines(&mut self, lines: Vec<CartLine>) {
        self.total_quantity = total_quantity(&lines);
        self.lines = lines;
    }

    /// Replace the lines and write them back in full.
    fn commit(&mut self, lines: Vec<CartLine>) {
        self.set_lines(lines);

        let encoded = match snapshot::encode(&self.lines) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to encode cart");
                return;
            }
        };

        if let Err(e) = self.storage.set_item(&self.key, &encoded) {
            warn!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }
}
