//! The three-step checkout flow and order submission.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shopkeep_core::{CheckoutStep, OrderNumber, PaymentOutcome};
use tracing::{info, warn};

use super::form::{CheckoutForm, FieldErrors};
use super::summary::OrderSummary;
use super::validation::{validate_checkout_form, validate_step};
use super::CheckoutError;
use crate::cart::CartStore;
use crate::config::PricingConfig;
use crate::payment::PaymentGateway;
use crate::storage::Storage;

/// Progress indicator entry for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepStatus {
    pub step: CheckoutStep,
    pub completed: bool,
    pub active: bool,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub order_number: OrderNumber,
    pub summary: OrderSummary,
    pub placed_at: DateTime<Utc>,
}

/// Where the customer is in the checkout form.
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    current: CheckoutStep,
}

impl CheckoutFlow {
    /// Start at the shipping step.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn current_step(&self) -> CheckoutStep {
        self.current
    }

    /// Advance if the current step's fields are filled in.
    ///
    /// Stays on the review step once reached.
    ///
    /// # Errors
    ///
    /// Returns the missing fields and leaves the step unchanged.
    pub fn next(&mut self, form: &CheckoutForm) -> Result<CheckoutStep, FieldErrors> {
        validate_step(form, self.current).into_result()?;
        if let Some(next) = self.current.next() {
            self.current = next;
        }
        Ok(self.current)
    }

    /// Go back one step, stopping at shipping.
    pub fn previous(&mut self) -> CheckoutStep {
        if let Some(previous) = self.current.previous() {
            self.current = previous;
        }
        self.current
    }

    /// Completed and active flags for each step.
    #[must_use]
    pub fn steps(&self) -> Vec<StepStatus> {
        CheckoutStep::ALL
            .iter()
            .map(|&step| StepStatus {
                step,
                completed: self.current > step,
                active: self.current == step,
            })
            .collect()
    }

    /// Validate the whole form, charge the gateway, and clear the cart.
    ///
    /// The cart is only cleared when the charge is approved.
    ///
    /// # Errors
    ///
    /// - `CheckoutError::EmptyCart` if there is nothing to buy
    /// - `CheckoutError::Validation` if any field fails validation
    /// - `CheckoutError::PaymentDeclined` if the gateway declines
    pub fn submit<S, G>(
        &mut self,
        form: &CheckoutForm,
        cart: &mut CartStore<S>,
        gateway: &mut G,
        pricing: &PricingConfig,
        now: DateTime<Utc>,
    ) -> Result<OrderConfirmation, CheckoutError>
    where
        S: Storage,
        G: PaymentGateway + ?Sized,
    {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        validate_checkout_form(form, now.date_naive())
            .into_result()
            .map_err(CheckoutError::Validation)?;

        let summary = OrderSummary::compute(cart.lines(), form.gift_wrap, pricing);

        match gateway.charge(&summary) {
            PaymentOutcome::Approved => {
                let order_number = OrderNumber::from_timestamp_millis(now.timestamp_millis());
                info!(
                    %order_number,
                    total = %summary.total,
                    items = summary.item_count,
                    "Order placed"
                );
                cart.clear();
                *self = Self::new();
                Ok(OrderConfirmation {
                    order_number,
                    summary,
                    placed_at: now,
                })
            }
            PaymentOutcome::Declined => {
                warn!(total = %summary.total, "Payment declined");
                Err(CheckoutError::PaymentDeclined)
            }
        }
    }
}
