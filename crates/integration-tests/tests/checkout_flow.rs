//! Catalog to cart to order, end to end.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use shopkeep_core::{CheckoutStep, ProductId};
use shopkeep_integration_tests::TestProfile;
use shopkeep_storefront::checkout::{CheckoutError, CheckoutField, CheckoutFlow, CheckoutForm};
use shopkeep_storefront::payment::SimulatedGateway;
use shopkeep_storefront::{AppError, PricingConfig, StorefrontConfig};

const FORM_YAML: &str = r#"
first_name: Grace
last_name: Hopper
email: grace@example.com
phone: "(555) 010-4477"
address: 1 Compiler Court
city: Arlington
state: VA
zip_code: "22201"
card_number: "4242 4242 4242 4242"
expiry_date: "08/29"
cvv: "123"
cardholder_name: Grace Hopper
gift_wrap: true
"#;

fn placed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 15, 30, 0).unwrap()
}

fn form() -> CheckoutForm {
    serde_yaml::from_str(FORM_YAML).unwrap()
}

#[test]
fn test_form_loads_from_yaml() {
    let form = form();
    assert_eq!(form.first_name, "Grace");
    assert_eq!(form.country, "United States");
    assert!(form.gift_wrap);
    assert_eq!(form.value(CheckoutField::Cvv), "123");
}

#[test]
fn test_order_is_placed_and_cart_emptied() {
    let profile = TestProfile::new();
    let catalog = profile.catalog();
    let lamp = catalog.get(&ProductId::new("6708a7e1c2b3f4d5e6a7b8c2")).unwrap();
    let notebook = catalog.get(&ProductId::new("6708a7e1c2b3f4d5e6a7b8c3")).unwrap();

    let mut cart = profile.open_cart();
    cart.increase(lamp);
    cart.increase(lamp);
    cart.increase(notebook);

    let form = form();
    let mut flow = CheckoutFlow::new();
    assert_eq!(flow.next(&form).unwrap(), CheckoutStep::Payment);
    assert_eq!(flow.next(&form).unwrap(), CheckoutStep::Review);

    let mut gateway = SimulatedGateway::seeded(1.0, 11);
    let confirmation = flow
        .submit(
            &form,
            &mut cart,
            &mut gateway,
            &PricingConfig::default(),
            placed_at(),
        )
        .unwrap();

    // 2 * 24.50 + 4.25 = 53.25, over the free-shipping threshold.
    let summary = &confirmation.summary;
    assert_eq!(summary.subtotal, Decimal::new(5325, 2));
    assert_eq!(summary.tax, Decimal::new(426, 2));
    assert!(summary.has_free_shipping());
    assert_eq!(summary.gift_wrap, Decimal::new(599, 2));
    assert_eq!(summary.total, Decimal::new(6350, 2));
    assert_eq!(summary.item_count, 3);
    assert_eq!(
        confirmation.order_number.to_string(),
        format!("ORD-{}", placed_at().timestamp_millis())
    );

    assert!(cart.is_empty());
    assert!(profile.open_cart().is_empty());
}

#[test]
fn test_declined_payment_keeps_cart() {
    let profile = TestProfile::new();
    let catalog = profile.catalog();
    let mut cart = profile.open_cart();
    cart.increase(catalog.iter().next().unwrap());

    let mut flow = CheckoutFlow::new();
    let mut gateway = SimulatedGateway::seeded(0.0, 11);
    let err = flow
        .submit(
            &form(),
            &mut cart,
            &mut gateway,
            &PricingConfig::default(),
            placed_at(),
        )
        .unwrap_err();

    assert!(matches!(err, CheckoutError::PaymentDeclined));
    let err = AppError::from(err);
    assert_eq!(
        err.user_message(),
        "Payment processing failed. Please try again."
    );
    assert_eq!(profile.open_cart().total_quantity(), 1);
}

#[test]
fn test_expired_card_is_rejected() {
    let profile = TestProfile::new();
    let catalog = profile.catalog();
    let mut cart = profile.open_cart();
    cart.increase(catalog.iter().next().unwrap());

    let form = CheckoutForm {
        expiry_date: "09/26".to_string(),
        ..form()
    };
    let mut gateway = SimulatedGateway::seeded(1.0, 11);
    let err = CheckoutFlow::new()
        .submit(
            &form,
            &mut cart,
            &mut gateway,
            &PricingConfig::default(),
            placed_at(),
        )
        .unwrap_err();

    let CheckoutError::Validation(errors) = err else {
        panic!("expected validation errors");
    };
    assert_eq!(errors.len(), 1);
    assert!(errors.contains(CheckoutField::ExpiryDate));
    assert_eq!(cart.total_quantity(), 1);
}

#[test]
fn test_pricing_follows_configuration() {
    let env = [
        ("SHOPKEEP_CURRENCY", "EUR"),
        ("SHOPKEEP_TAX_RATE", "0.2"),
        ("SHOPKEEP_FREE_SHIPPING_THRESHOLD", "100"),
        ("SHOPKEEP_SHIPPING_FEE", "4"),
    ];
    let config = StorefrontConfig::from_lookup(|key| {
        env.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
    })
    .unwrap();

    let profile = TestProfile::new();
    let catalog = profile.catalog();
    let mut cart = profile.open_cart();
    cart.increase(catalog.get(&ProductId::new("6708a7e1c2b3f4d5e6a7b8c1")).unwrap());

    let summary = shopkeep_storefront::checkout::OrderSummary::compute(
        cart.lines(),
        false,
        &config.pricing,
    );
    assert_eq!(summary.tax, Decimal::new(1600, 2));
    assert_eq!(summary.shipping, Decimal::from(4));
    assert_eq!(summary.total, Decimal::new(9999, 2));
    assert_eq!(summary.format(summary.total), "€99.99");
}
