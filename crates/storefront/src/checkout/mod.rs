//! Checkout: form model, validation, pricing, and submission.
//!
//! The flow mirrors the storefront's checkout page: shipping details, then
//! payment details, then a review step that submits the order. Step
//! navigation only checks that fields are filled in; the full format checks
//! (Luhn, expiry, ZIP, and so on) run at submission.

mod flow;
mod form;
mod summary;
mod validation;

pub use flow::{CheckoutFlow, OrderConfirmation, StepStatus};
pub use form::{CheckoutField, CheckoutForm, FieldErrors};
pub use summary::OrderSummary;
pub use validation::{
    format_card_number, format_expiry_date, format_phone_number, is_valid_card_number,
    is_valid_expiry, is_valid_phone, validate_checkout_form, validate_step,
};

use thiserror::Error;

/// Errors that can occur when submitting an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("Your cart is empty")]
    EmptyCart,

    /// One or more form fields are invalid.
    #[error("Invalid checkout form: {0}")]
    Validation(FieldErrors),

    /// The payment gateway declined the charge.
    #[error("Payment processing failed. Please try again.")]
    PaymentDeclined,
}
