//! Payment gateway seam.
//!
//! There is no real payment processor. [`SimulatedGateway`] approves a
//! configurable share of charges at random so the decline path gets
//! exercised.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shopkeep_core::PaymentOutcome;
use tracing::debug;

use crate::checkout::OrderSummary;

/// Something that can charge an order total.
pub trait PaymentGateway {
    /// Attempt to charge `summary.total`.
    fn charge(&mut self, summary: &OrderSummary) -> PaymentOutcome;
}

impl<G: PaymentGateway + ?Sized> PaymentGateway for &mut G {
    fn charge(&mut self, summary: &OrderSummary) -> PaymentOutcome {
        (**self).charge(summary)
    }
}

/// Approves each charge with probability `success_rate`.
#[derive(Debug, Clone)]
pub struct SimulatedGateway<R = StdRng> {
    rng: R,
    success_rate: f64,
}

impl SimulatedGateway<StdRng> {
    /// A gateway seeded from the operating system.
    #[must_use]
    pub fn new(success_rate: f64) -> Self {
        Self::with_rng(StdRng::from_os_rng(), success_rate)
    }

    /// A deterministic gateway for reproducible runs.
    #[must_use]
    pub fn seeded(success_rate: f64, seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), success_rate)
    }
}

impl<R: Rng> SimulatedGateway<R> {
    /// Use a caller-supplied random source. `success_rate` is clamped to
    /// `[0, 1]`; NaN is treated as 0.
    pub fn with_rng(rng: R, success_rate: f64) -> Self {
        let success_rate = if success_rate.is_nan() {
            0.0
        } else {
            success_rate.clamp(0.0, 1.0)
        };
        Self { rng, success_rate }
    }

    #[must_use]
    pub const fn success_rate(&self) -> f64 {
        self.success_rate
    }
}

impl<R: Rng> PaymentGateway for SimulatedGateway<R> {
    fn charge(&mut self, summary: &OrderSummary) -> PaymentOutcome {
        let outcome = if self.rng.random_bool(self.success_rate) {
            PaymentOutcome::Approved
        } else {
            PaymentOutcome::Declined
        };
        debug!(total = %summary.total, ?outcome, "Simulated payment");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PricingConfig;

    fn summary() -> OrderSummary {
        OrderSummary::compute(&[], false, &PricingConfig::default())
    }

    #[test]
    fn test_always_approves_at_one() {
        let mut gateway = SimulatedGateway::seeded(1.0, 7);
        for _ in 0..100 {
            assert_eq!(gateway.charge(&summary()), PaymentOutcome::Approved);
        }
    }

    #[test]
    fn test_always_declines_at_zero() {
        let mut gateway = SimulatedGateway::seeded(0.0, 7);
        for _ in 0..100 {
            assert_eq!(gateway.charge(&summary()), PaymentOutcome::Declined);
        }
    }

    #[test]
    fn test_rate_is_clamped() {
        assert!((SimulatedGateway::seeded(3.0, 1).success_rate() - 1.0).abs() < f64::EPSILON);
        assert!(SimulatedGateway::seeded(-1.0, 1).success_rate().abs() < f64::EPSILON);
        assert!(SimulatedGateway::seeded(f64::NAN, 1).success_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let run = |seed| {
            let mut gateway = SimulatedGateway::seeded(0.5, seed);
            (0..32)
                .map(|_| gateway.charge(&summary()))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_mixed_outcomes_at_half() {
        let mut gateway = SimulatedGateway::seeded(0.5, 3);
        let approved = (0..1000)
            .filter(|_| gateway.charge(&summary()).is_approved())
            .count();
        assert!((300..=700).contains(&approved));
    }
}
