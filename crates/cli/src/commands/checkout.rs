//! Checkout commands.

use std::fs;
use std::path::Path;

use chrono::Utc;
use shopkeep_storefront::AppError;
use shopkeep_storefront::checkout::{
    CheckoutError, CheckoutFlow, CheckoutForm, FieldErrors, OrderSummary,
};
use shopkeep_storefront::payment::SimulatedGateway;
use tracing::{info, warn};

use super::Session;

fn log_summary(summary: &OrderSummary) {
    info!(items = summary.item_count, subtotal = %summary.format(summary.subtotal), "Subtotal");
    info!(tax = %summary.format(summary.tax), "Tax");
    if summary.has_free_shipping() {
        info!(shipping = "FREE", "Shipping");
    } else {
        info!(shipping = %summary.format(summary.shipping), "Shipping");
    }
    if !summary.gift_wrap.is_zero() {
        info!(gift_wrap = %summary.format(summary.gift_wrap), "Gift wrap");
    }
    info!(total = %summary.format(summary.total), "Total");
}

/// Price the current cart.
pub fn summary(session: &Session, gift_wrap: bool) {
    let summary = OrderSummary::compute(session.cart.lines(), gift_wrap, &session.config.pricing);
    log_summary(&summary);
}

/// Walk the checkout steps with the form in `path` and place the order.
///
/// # Errors
///
/// Returns an error if the form cannot be read or parsed, a step is
/// incomplete, validation fails, or the payment is declined.
pub fn submit(session: &mut Session, path: &Path) -> Result<(), AppError> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::BadRequest(format!("Cannot read form {}: {e}", path.display()))
    })?;
    let form: CheckoutForm = serde_yaml::from_str(&content)
        .map_err(|e| AppError::BadRequest(format!("Invalid form {}: {e}", path.display())))?;

    let mut flow = CheckoutFlow::new();
    for status in flow.steps() {
        info!(step = status.step.number(), title = status.step.title(), "Checkout step");
        if let Err(errors) = flow.next(&form) {
            report_field_errors(&errors);
            return Err(CheckoutError::Validation(errors).into());
        }
    }

    let mut gateway = SimulatedGateway::new(session.config.payment_success_rate);
    let result = flow.submit(
        &form,
        &mut session.cart,
        &mut gateway,
        &session.config.pricing,
        Utc::now(),
    );

    match result {
        Ok(confirmation) => {
            log_summary(&confirmation.summary);
            info!(order_number = %confirmation.order_number, "Order placed successfully");
            Ok(())
        }
        Err(CheckoutError::Validation(errors)) => {
            report_field_errors(&errors);
            Err(CheckoutError::Validation(errors).into())
        }
        Err(e) => Err(e.into()),
    }
}

fn report_field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        warn!(%field, "{message}");
    }
}
