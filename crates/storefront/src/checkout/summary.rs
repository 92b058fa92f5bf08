//! Order summary pricing.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use shopkeep_core::{CurrencyCode, Price};

use crate::cart::{self, CartLine, total_quantity};
use crate::config::PricingConfig;

/// Cost breakdown shown beside the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub currency: CurrencyCode,
    pub subtotal: Decimal,
    /// Subtotal times the tax rate, rounded to cents.
    pub tax: Decimal,
    /// Zero when the subtotal exceeds the free-shipping threshold.
    pub shipping: Decimal,
    pub gift_wrap: Decimal,
    pub total: Decimal,
    pub item_count: u64,
}

impl OrderSummary {
    /// Price `lines` under `pricing`.
    #[must_use]
    pub fn compute(lines: &[CartLine], gift_wrap: bool, pricing: &PricingConfig) -> Self {
        let subtotal = cart::subtotal(lines);
        let tax = subtotal
            .saturating_mul(pricing.tax_rate)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let shipping = if subtotal > pricing.free_shipping_threshold {
            Decimal::ZERO
        } else {
            pricing.shipping_fee
        };
        let gift_wrap = if gift_wrap {
            pricing.gift_wrap_fee
        } else {
            Decimal::ZERO
        };

        Self {
            currency: pricing.currency,
            subtotal,
            tax,
            shipping,
            gift_wrap,
            total: subtotal
                .saturating_add(tax)
                .saturating_add(shipping)
                .saturating_add(gift_wrap),
            item_count: total_quantity(lines),
        }
    }

    #[must_use]
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// Format an amount in the summary's currency.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        Price::new(amount, self.currency).display()
    }
}
