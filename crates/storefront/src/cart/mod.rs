//! Shopping cart state.
//!
//! [`CartStore`] owns the list of [`CartLine`]s for one profile and mirrors
//! it into a [`Storage`](crate::storage::Storage) slot after every mutation.
//!
//! # Invariants
//!
//! - At most one line per product id.
//! - Every line has quantity ≥ 1.
//! - Every line has a non-negative price.
//! - The persisted value equals the in-memory lines after each mutation
//!   (unless the backend rejected the write, which is logged).

mod line;
mod snapshot;
mod store;

pub use line::{CartLine, consolidate, subtotal, total_quantity};
pub use store::{CartStore, DEFAULT_CART_KEY};
