//! Customer email addresses.
//!
//! The checkout form accepts anything shaped like `local@domain.tld`: no
//! whitespace, a single `@`, and a domain with at least one dot that has
//! text on both sides. Deliverability is not checked.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a string was rejected as an [`Email`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is empty")]
    Empty,
    #[error("email is longer than {0} characters")]
    TooLong(usize),
    #[error("email contains whitespace")]
    Whitespace,
    #[error("email needs exactly one @")]
    AtSign,
    #[error("email has nothing before the @")]
    NoLocalPart,
    #[error("email domain needs a dot between two labels")]
    BadDomain,
}

/// A syntactically plausible email address.
///
/// ```
/// use shopkeep_core::Email;
///
/// assert!(Email::parse("shopper+gifts@mail.example.co.uk").is_ok());
/// assert!(Email::parse("shopper@localhost").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// RFC 5321 path limit.
    pub const MAX_LENGTH: usize = 254;

    /// # Errors
    ///
    /// Returns the first rule `input` breaks.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        check(input)?;
        Ok(Self(input.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text after the `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.rsplit('@').next().unwrap_or_default()
    }
}

fn check(input: &str) -> Result<(), EmailError> {
    if input.is_empty() {
        return Err(EmailError::Empty);
    }
    if input.len() > Email::MAX_LENGTH {
        return Err(EmailError::TooLong(Email::MAX_LENGTH));
    }
    if input.contains(char::is_whitespace) {
        return Err(EmailError::Whitespace);
    }

    let mut parts = input.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(EmailError::AtSign);
    };
    if local.is_empty() {
        return Err(EmailError::NoLocalPart);
    }

    // A dot that is neither the first nor the last character of the domain.
    let mut interior = domain.chars();
    interior.next();
    interior.next_back();
    if interior.as_str().contains('.') {
        Ok(())
    } else {
        Err(EmailError::BadDomain)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        check(&value)?;
        Ok(Self(value))
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
