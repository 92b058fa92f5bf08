//! Checkout form validation and input formatting.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use shopkeep_core::{CheckoutStep, Email};

use super::form::{CheckoutField, CheckoutForm, FieldErrors};

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("Invalid regex"));

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("Invalid regex"));

static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").expect("Invalid regex"));

static CVV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3,4}$").expect("Invalid regex"));

/// Validate every field of the form.
///
/// `today` decides whether the card's expiry month has passed.
#[must_use]
pub fn validate_checkout_form(form: &CheckoutForm, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    min_length(
        &mut errors,
        form,
        CheckoutField::FirstName,
        2,
        "First name is required",
        "First name must be at least 2 characters",
    );
    min_length(
        &mut errors,
        form,
        CheckoutField::LastName,
        2,
        "Last name is required",
        "Last name must be at least 2 characters",
    );

    if is_blank(&form.email) {
        errors.insert(CheckoutField::Email, "Email is required");
    } else if Email::parse(&form.email).is_err() {
        errors.insert(CheckoutField::Email, "Please enter a valid email address");
    }

    if is_blank(&form.phone) {
        errors.insert(CheckoutField::Phone, "Phone number is required");
    } else if !is_valid_phone(&form.phone) {
        errors.insert(CheckoutField::Phone, "Please enter a valid phone number");
    }

    min_length(
        &mut errors,
        form,
        CheckoutField::Address,
        5,
        "Address is required",
        "Please enter a complete address",
    );
    min_length(
        &mut errors,
        form,
        CheckoutField::City,
        2,
        "City is required",
        "Please enter a valid city name",
    );
    min_length(
        &mut errors,
        form,
        CheckoutField::State,
        2,
        "State is required",
        "Please enter a valid state",
    );

    if is_blank(&form.zip_code) {
        errors.insert(CheckoutField::ZipCode, "ZIP code is required");
    } else if !ZIP_RE.is_match(&form.zip_code) {
        errors.insert(
            CheckoutField::ZipCode,
            "Please enter a valid ZIP code (12345 or 12345-6789)",
        );
    }

    if is_blank(&form.country) {
        errors.insert(CheckoutField::Country, "Country is required");
    }

    let card_number = form.value(CheckoutField::CardNumber);
    if is_blank(card_number) {
        errors.insert(CheckoutField::CardNumber, "Card number is required");
    } else if !is_valid_card_number(card_number) {
        errors.insert(CheckoutField::CardNumber, "Please enter a valid card number");
    }

    if is_blank(&form.expiry_date) {
        errors.insert(CheckoutField::ExpiryDate, "Expiry date is required");
    } else if !is_valid_expiry(&form.expiry_date, today) {
        errors.insert(
            CheckoutField::ExpiryDate,
            "Please enter a valid expiry date (MM/YY)",
        );
    }

    let cvv = form.value(CheckoutField::Cvv);
    if is_blank(cvv) {
        errors.insert(CheckoutField::Cvv, "CVV is required");
    } else if !CVV_RE.is_match(cvv) {
        errors.insert(CheckoutField::Cvv, "Please enter a valid CVV (3-4 digits)");
    }

    min_length(
        &mut errors,
        form,
        CheckoutField::CardholderName,
        2,
        "Cardholder name is required",
        "Please enter the full name on the card",
    );

    errors
}

/// Presence checks for the fields gathered on `step`.
///
/// Only blank fields are reported; format checks wait for the full
/// validation at submission.
#[must_use]
pub fn validate_step(form: &CheckoutForm, step: CheckoutStep) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let fields: &[CheckoutField] = match step {
        CheckoutStep::Shipping => &CheckoutField::SHIPPING,
        CheckoutStep::Payment => &CheckoutField::PAYMENT,
        CheckoutStep::Review => &[],
    };

    for &field in fields {
        if is_blank(form.value(field)) {
            errors.insert(field, required_message(field));
        }
    }

    errors
}

const fn required_message(field: CheckoutField) -> &'static str {
    match field {
        CheckoutField::FirstName => "First name is required",
        CheckoutField::LastName => "Last name is required",
        CheckoutField::Email => "Email is required",
        CheckoutField::Phone => "Phone is required",
        CheckoutField::Address => "Address is required",
        CheckoutField::City => "City is required",
        CheckoutField::State => "State is required",
        CheckoutField::ZipCode => "ZIP code is required",
        CheckoutField::Country => "Country is required",
        CheckoutField::CardNumber => "Card number is required",
        CheckoutField::ExpiryDate => "Expiry date is required",
        CheckoutField::Cvv => "CVV is required",
        CheckoutField::CardholderName => "Cardholder name is required",
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn min_length(
    errors: &mut FieldErrors,
    form: &CheckoutForm,
    field: CheckoutField,
    min: usize,
    required: &'static str,
    too_short: &'static str,
) {
    let trimmed = form.value(field).trim();
    if trimmed.is_empty() {
        errors.insert(field, required);
    } else if trimmed.chars().count() < min {
        errors.insert(field, too_short);
    }
}

/// Phone numbers may contain spaces, dashes, and parentheses for readability.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let cleaned: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();
    PHONE_RE.is_match(&cleaned)
}

/// 13-19 digits (spaces ignored) passing the Luhn checksum.
#[must_use]
pub fn is_valid_card_number(card_number: &str) -> bool {
    let digits: Vec<u32> = card_number
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_digit(10))
        .collect::<Option<_>>()
        .unwrap_or_default();

    if !(13..=19).contains(&digits.len()) {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}

/// `MM/YY` not earlier than the month containing `today`.
#[must_use]
pub fn is_valid_expiry(expiry: &str, today: NaiveDate) -> bool {
    let Some(caps) = EXPIRY_RE.captures(expiry) else {
        return false;
    };
    let (Some(month), Some(year)) = (caps.get(1), caps.get(2)) else {
        return false;
    };
    let (Ok(month), Ok(year)) = (month.as_str().parse::<u32>(), year.as_str().parse::<i32>())
    else {
        return false;
    };

    let current_year = today.year().rem_euclid(100);
    let current_month = today.month();

    year > current_year || (year == current_year && month >= current_month)
}

// =============================================================================
// Input Formatting
// =============================================================================

/// Group card digits in fours, e.g. `4111 1111 1111 1111`.
#[must_use]
pub fn format_card_number(value: &str) -> String {
    let cleaned: Vec<char> = value.chars().filter(|c| !c.is_whitespace()).collect();
    let grouped = cleaned
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ");
    grouped.chars().take(19).collect()
}

/// Digits only, with a slash after the month once two digits are present.
#[must_use]
pub fn format_expiry_date(value: &str) -> String {
    let cleaned: String = value.chars().filter(char::is_ascii_digit).collect();
    if cleaned.len() >= 2 {
        format!("{}/{}", ascii_slice(&cleaned, 0, 2), ascii_slice(&cleaned, 2, 4))
    } else {
        cleaned
    }
}

/// Progressive US formatting: `(555) 123-4567`.
#[must_use]
pub fn format_phone_number(value: &str) -> String {
    let cleaned: String = value.chars().filter(char::is_ascii_digit).collect();
    if cleaned.len() >= 6 {
        format!(
            "({}) {}-{}",
            ascii_slice(&cleaned, 0, 3),
            ascii_slice(&cleaned, 3, 6),
            ascii_slice(&cleaned, 6, 10)
        )
    } else if cleaned.len() >= 3 {
        format!(
            "({}) {}",
            ascii_slice(&cleaned, 0, 3),
            ascii_slice(&cleaned, 3, cleaned.len())
        )
    } else {
        cleaned
    }
}

/// Clamped byte slice of an ASCII-only string.
fn ascii_slice(s: &str, start: usize, end: usize) -> &str {
    let end = end.min(s.len());
    s.get(start.min(end)..end).unwrap_or("")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            state: "NY".to_string(),
            zip_code: "10001".to_string(),
            country: "United States".to_string(),
            card_number: SecretString::from("4111 1111 1111 1111".to_string()),
            expiry_date: "12/27".to_string(),
            cvv: SecretString::from("123".to_string()),
            cardholder_name: "Ada Lovelace".to_string(),
            ..CheckoutForm::default()
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let errors = validate_checkout_form(&valid_form(), today());
        assert!(errors.is_empty(), "unexpected errors: {errors}");
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let form = CheckoutForm {
            country: String::new(),
            ..CheckoutForm::default()
        };
        let errors = validate_checkout_form(&form, today());

        assert_eq!(errors.len(), 13);
        assert_eq!(
            errors.get(CheckoutField::FirstName),
            Some("First name is required")
        );
        assert_eq!(errors.get(CheckoutField::Phone), Some("Phone number is required"));
        assert_eq!(errors.get(CheckoutField::Cvv), Some("CVV is required"));
    }

    #[test]
    fn test_short_fields() {
        let form = CheckoutForm {
            first_name: " A ".to_string(),
            address: "1 A".to_string(),
            cardholder_name: "Z".to_string(),
            ..valid_form()
        };
        let errors = validate_checkout_form(&form, today());

        assert_eq!(
            errors.get(CheckoutField::FirstName),
            Some("First name must be at least 2 characters")
        );
        assert_eq!(
            errors.get(CheckoutField::Address),
            Some("Please enter a complete address")
        );
        assert_eq!(
            errors.get(CheckoutField::CardholderName),
            Some("Please enter the full name on the card")
        );
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_invalid_formats() {
        let form = CheckoutForm {
            email: "ada@localhost".to_string(),
            zip_code: "1234".to_string(),
            card_number: SecretString::from("4111 1111 1111 1112".to_string()),
            cvv: SecretString::from("12a".to_string()),
            expiry_date: "13/27".to_string(),
            ..valid_form()
        };
        let errors = validate_checkout_form(&form, today());

        assert!(errors.contains(CheckoutField::Email));
        assert!(errors.contains(CheckoutField::ZipCode));
        assert!(errors.contains(CheckoutField::CardNumber));
        assert!(errors.contains(CheckoutField::Cvv));
        assert!(errors.contains(CheckoutField::ExpiryDate));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(is_valid_phone("+44 20 7946 0958"));
        assert!(!is_valid_phone("0555123456"));
        assert!(!is_valid_phone("555-CALL"));
        assert!(!is_valid_phone("12345678901234567"));
    }

    #[test]
    fn test_zip_validation() {
        assert!(ZIP_RE.is_match("12345"));
        assert!(ZIP_RE.is_match("12345-6789"));
        assert!(!ZIP_RE.is_match("12345-678"));
        assert!(!ZIP_RE.is_match(" 12345"));
        assert!(!ZIP_RE.is_match("١٢٣٤٥"));
        assert!(!ZIP_RE.is_match("12345-٦٧٨٩"));
    }

    #[test]
    fn test_digit_classes_are_ascii_only() {
        assert!(CVV_RE.is_match("123"));
        assert!(!CVV_RE.is_match("١٢٣"));
        assert!(!is_valid_phone("5٥٥1234567"));
        assert!(!is_valid_expiry("10/٢٧", today()));
    }

    #[test]
    fn test_luhn() {
        assert!(is_valid_card_number("4111111111111111"));
        assert!(is_valid_card_number("5500 0000 0000 0004"));
        assert!(is_valid_card_number("378282246310005"));
        assert!(!is_valid_card_number("4111111111111112"));
        assert!(!is_valid_card_number("4111-1111-1111-1111"));
        assert!(!is_valid_card_number("411111111111"));
    }

    #[test]
    fn test_expiry() {
        assert!(is_valid_expiry("10/26", today()));
        assert!(is_valid_expiry("01/27", today()));
        assert!(!is_valid_expiry("09/26", today()));
        assert!(!is_valid_expiry("12/25", today()));
        assert!(!is_valid_expiry("00/27", today()));
        assert!(!is_valid_expiry("1/27", today()));
        assert!(!is_valid_expiry("10/2026", today()));
    }

    #[test]
    fn test_validate_step_shipping_only_checks_presence() {
        let form = CheckoutForm {
            email: "not-an-email".to_string(),
            city: "   ".to_string(),
            ..valid_form()
        };
        let errors = validate_step(&form, CheckoutStep::Shipping);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(CheckoutField::City), Some("City is required"));
    }

    #[test]
    fn test_validate_step_payment() {
        let form = CheckoutForm {
            cvv: SecretString::from(String::new()),
            first_name: String::new(),
            ..valid_form()
        };
        let errors = validate_step(&form, CheckoutStep::Payment);

        assert_eq!(errors.len(), 1);
        assert!(errors.contains(CheckoutField::Cvv));
    }

    #[test]
    fn test_validate_step_review_is_always_clean() {
        assert!(validate_step(&CheckoutForm::default(), CheckoutStep::Review).is_empty());
    }

    #[test]
    fn test_format_card_number() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("4111 11"), "4111 11");
        assert_eq!(format_card_number("41111111111111112222"), "4111 1111 1111 1111");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn test_format_expiry_date() {
        assert_eq!(format_expiry_date("1"), "1");
        assert_eq!(format_expiry_date("12"), "12/");
        assert_eq!(format_expiry_date("1227"), "12/27");
        assert_eq!(format_expiry_date("12/2799"), "12/27");
    }

    #[test]
    fn test_format_phone_number() {
        assert_eq!(format_phone_number("55"), "55");
        assert_eq!(format_phone_number("5551"), "(555) 1");
        assert_eq!(format_phone_number("555123"), "(555) 123-");
        assert_eq!(format_phone_number("555-123-4567"), "(555) 123-4567");
        assert_eq!(format_phone_number("555123456789"), "(555) 123-4567");
    }
}
