//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPKEEP_DATA_DIR` - Profile directory for persisted state (default: .shopkeep)
//! - `SHOPKEEP_CART_KEY` - Storage key for the cart (default: shopping-cart)
//! - `SHOPKEEP_CATALOG_PATH` - JSON product listing to browse
//! - `SHOPKEEP_CURRENCY` - ISO 4217 display currency (default: USD)
//! - `SHOPKEEP_TAX_RATE` - Sales tax rate as a fraction (default: 0.08)
//! - `SHOPKEEP_FREE_SHIPPING_THRESHOLD` - Subtotal above which shipping is free (default: 50)
//! - `SHOPKEEP_SHIPPING_FEE` - Flat shipping fee below the threshold (default: 9.99)
//! - `SHOPKEEP_GIFT_WRAP_FEE` - Gift wrap surcharge (default: 5.99)
//! - `SHOPKEEP_PAYMENT_SUCCESS_RATE` - Approval probability of the simulated gateway (default: 0.9)

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use shopkeep_core::CurrencyCode;
use thiserror::Error;

use crate::cart::DEFAULT_CART_KEY;

const DEFAULT_DATA_DIR: &str = ".shopkeep";
const DEFAULT_PAYMENT_SUCCESS_RATE: f64 = 0.9;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the persisted cart
    pub data_dir: PathBuf,
    /// Storage key the cart is written under
    pub cart_key: String,
    /// Product listing to load, if any
    pub catalog_path: Option<PathBuf>,
    /// Order summary pricing rules
    pub pricing: PricingConfig,
    /// Probability that the simulated gateway approves a charge
    pub payment_success_rate: f64,
}

/// Pricing rules applied when summarising an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    pub currency: CurrencyCode,
    /// Fraction of the subtotal charged as tax (0.08 = 8%)
    pub tax_rate: Decimal,
    /// Shipping is free when the subtotal is strictly above this amount
    pub free_shipping_threshold: Decimal,
    pub shipping_fee: Decimal,
    pub gift_wrap_fee: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::USD,
            tax_rate: Decimal::new(8, 2),
            free_shipping_threshold: Decimal::from(50),
            shipping_fee: Decimal::new(999, 2),
            gift_wrap_fee: Decimal::new(599, 2),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
            catalog_path: None,
            pricing: PricingConfig::default(),
            payment_success_rate: DEFAULT_PAYMENT_SUCCESS_RATE,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let pricing_defaults = PricingConfig::default();

        let data_dir = lookup("SHOPKEEP_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let cart_key = lookup("SHOPKEEP_CART_KEY").unwrap_or(defaults.cart_key);
        if cart_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPKEEP_CART_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }
        let catalog_path = lookup("SHOPKEEP_CATALOG_PATH").map(PathBuf::from);

        let currency = parse_or(&lookup, "SHOPKEEP_CURRENCY", pricing_defaults.currency)?;
        let pricing = PricingConfig {
            currency,
            tax_rate: non_negative_decimal(&lookup, "SHOPKEEP_TAX_RATE", pricing_defaults.tax_rate)?,
            free_shipping_threshold: non_negative_decimal(
                &lookup,
                "SHOPKEEP_FREE_SHIPPING_THRESHOLD",
                pricing_defaults.free_shipping_threshold,
            )?,
            shipping_fee: non_negative_decimal(
                &lookup,
                "SHOPKEEP_SHIPPING_FEE",
                pricing_defaults.shipping_fee,
            )?,
            gift_wrap_fee: non_negative_decimal(
                &lookup,
                "SHOPKEEP_GIFT_WRAP_FEE",
                pricing_defaults.gift_wrap_fee,
            )?,
        };

        let payment_success_rate = parse_or(
            &lookup,
            "SHOPKEEP_PAYMENT_SUCCESS_RATE",
            defaults.payment_success_rate,
        )?;
        if !(0.0..=1.0).contains(&payment_success_rate) {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPKEEP_PAYMENT_SUCCESS_RATE".to_string(),
                format!("must be between 0 and 1 (got {payment_success_rate})"),
            ));
        }

        Ok(Self {
            data_dir,
            cart_key,
            catalog_path,
            pricing,
            payment_success_rate,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if present, otherwise use `default`.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a decimal amount that must not be negative.
fn non_negative_decimal(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Decimal,
) -> Result<Decimal, ConfigError> {
    let value = parse_or(lookup, key, default)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must not be negative (got {value})"),
        ));
    }
    Ok(value)
}
