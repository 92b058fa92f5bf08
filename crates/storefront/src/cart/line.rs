//! Cart lines and duplicate consolidation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopkeep_core::{Product, ProductId};

/// One distinct product's presence in the cart.
///
/// Serialized as `{ "product": {...}, "quantity": n }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot of the product taken when it was first added.
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// A fresh line with quantity 1.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Merge lines that share a product id.
///
/// Each id keeps the position and product snapshot of its first occurrence;
/// its quantity becomes the sum of every occurrence (saturating at
/// `u32::MAX`). Running it on already-consolidated input returns an equal
/// list.
#[must_use]
pub fn consolidate(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());
    let mut positions: HashMap<ProductId, usize> = HashMap::with_capacity(lines.len());

    for line in lines {
        match positions.get(line.product_id()).and_then(|&i| merged.get_mut(i)) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => {
                positions.insert(line.product_id().clone(), merged.len());
                merged.push(line);
            }
        }
    }

    merged
}

/// Sum of line totals across `lines`, saturating at the `Decimal` bounds.
#[must_use]
pub fn subtotal(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .map(CartLine::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Sum of quantities across `lines`.
#[must_use]
pub fn total_quantity(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity)).sum()
}
