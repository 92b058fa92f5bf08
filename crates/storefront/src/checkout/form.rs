//! Checkout form data and per-field errors.

use std::collections::BTreeMap;
use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

const DEFAULT_COUNTRY: &str = "United States";

/// Everything the customer enters across the three checkout steps.
///
/// Card number and CVV are held as secrets and never appear in `Debug`
/// output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    // Personal information
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,

    // Shipping address
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,

    // Payment information
    #[serde(deserialize_with = "secret_from_string")]
    pub card_number: SecretString,
    pub expiry_date: String,
    #[serde(deserialize_with = "secret_from_string")]
    pub cvv: SecretString,
    pub cardholder_name: String,

    // Additional options
    pub save_info: bool,
    pub newsletter: bool,
    pub gift_wrap: bool,
    pub special_instructions: String,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            card_number: SecretString::from(String::new()),
            expiry_date: String::new(),
            cvv: SecretString::from(String::new()),
            cardholder_name: String::new(),
            save_info: false,
            newsletter: false,
            gift_wrap: false,
            special_instructions: String::new(),
        }
    }
}

impl CheckoutForm {
    /// Raw text of a validated field.
    #[must_use]
    pub fn value(&self, field: CheckoutField) -> &str {
        match field {
            CheckoutField::FirstName => &self.first_name,
            CheckoutField::LastName => &self.last_name,
            CheckoutField::Email => &self.email,
            CheckoutField::Phone => &self.phone,
            CheckoutField::Address => &self.address,
            CheckoutField::City => &self.city,
            CheckoutField::State => &self.state,
            CheckoutField::ZipCode => &self.zip_code,
            CheckoutField::Country => &self.country,
            CheckoutField::CardNumber => self.card_number.expose_secret(),
            CheckoutField::ExpiryDate => &self.expiry_date,
            CheckoutField::Cvv => self.cvv.expose_secret(),
            CheckoutField::CardholderName => &self.cardholder_name,
        }
    }
}

fn secret_from_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

/// A validated form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
    Country,
    CardNumber,
    ExpiryDate,
    Cvv,
    CardholderName,
}

impl CheckoutField {
    /// Fields collected on the shipping step.
    pub const SHIPPING: [Self; 9] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::City,
        Self::State,
        Self::ZipCode,
        Self::Country,
    ];

    /// Fields collected on the payment step.
    pub const PAYMENT: [Self; 4] = [
        Self::CardNumber,
        Self::ExpiryDate,
        Self::Cvv,
        Self::CardholderName,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zip_code",
            Self::Country => "country",
            Self::CardNumber => "card_number",
            Self::ExpiryDate => "expiry_date",
            Self::Cvv => "cvv",
            Self::CardholderName => "cardholder_name",
        }
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation messages keyed by field, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<CheckoutField, &'static str>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message, keeping the first one reported for a field.
    pub fn insert(&mut self, field: CheckoutField, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    #[must_use]
    pub fn get(&self, field: CheckoutField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    #[must_use]
    pub fn contains(&self, field: CheckoutField) -> bool {
        self.0.contains_key(&field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CheckoutField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    /// `Ok(())` when empty, otherwise the errors themselves.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}
