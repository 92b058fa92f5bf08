//! Status enums for the checkout flow.

use serde::{Deserialize, Serialize};

/// A step of the three-step checkout form.
///
/// Steps are ordered; `Shipping < Payment < Review`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Delivery information.
    #[default]
    Shipping,
    /// Card details.
    Payment,
    /// Final confirmation.
    Review,
}

impl CheckoutStep {
    /// All steps in order.
    pub const ALL: [Self; 3] = [Self::Shipping, Self::Payment, Self::Review];

    /// Stable identifier used by the presentation layer.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Shipping => "shipping",
            Self::Payment => "payment",
            Self::Review => "review",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Shipping => "Shipping",
            Self::Payment => "Payment",
            Self::Review => "Review",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Shipping => "Delivery information",
            Self::Payment => "Payment details",
            Self::Review => "Confirm order",
        }
    }

    /// One-based position, as shown in the progress indicator.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Shipping => 1,
            Self::Payment => 2,
            Self::Review => 3,
        }
    }

    /// The following step, or `None` from the last step.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Shipping => Some(Self::Payment),
            Self::Payment => Some(Self::Review),
            Self::Review => None,
        }
    }

    /// The preceding step, or `None` from the first step.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Shipping => None,
            Self::Payment => Some(Self::Shipping),
            Self::Review => Some(Self::Payment),
        }
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Result of charging a payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    Approved,
    Declined,
}

impl PaymentOutcome {
    #[must_use]
    pub const fn is_approved(self) -> bool {
        matches!(self, Self::Approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert!(CheckoutStep::Shipping < CheckoutStep::Payment);
        assert!(CheckoutStep::Payment < CheckoutStep::Review);
        assert_eq!(CheckoutStep::default(), CheckoutStep::Shipping);
    }

    #[test]
    fn test_step_navigation() {
        assert_eq!(CheckoutStep::Shipping.next(), Some(CheckoutStep::Payment));
        assert_eq!(CheckoutStep::Review.next(), None);
        assert_eq!(CheckoutStep::Shipping.previous(), None);
        assert_eq!(CheckoutStep::Review.previous(), Some(CheckoutStep::Payment));
    }

    #[test]
    fn test_step_numbers_follow_all() {
        for (index, step) in CheckoutStep::ALL.iter().enumerate() {
            assert_eq!(usize::from(step.number()), index + 1);
        }
    }

    #[test]
    fn test_payment_outcome() {
        assert!(PaymentOutcome::Approved.is_approved());
        assert!(!PaymentOutcome::Declined.is_approved());
    }
}
