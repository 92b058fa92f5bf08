//! Cart commands.
//!
//! Every mutation is written through to the profile directory by the cart
//! store itself; these commands only report the result.

use shopkeep_core::{Price, ProductId};
use shopkeep_storefront::AppError;
use tracing::info;

use super::Session;

/// Show every line plus the item count and subtotal.
pub fn show(session: &Session) {
    let currency = session.config.pricing.currency;
    let cart = &session.cart;

    if cart.is_empty() {
        info!("Your cart is empty");
        return;
    }

    for line in cart.lines() {
        info!(
            id = %line.product_id(),
            name = %line.product.name,
            quantity = line.quantity,
            unit_price = %Price::new(line.product.price, currency),
            line_total = %Price::new(line.line_total(), currency),
            "Cart line"
        );
    }
    info!(
        items = cart.total_quantity(),
        subtotal = %Price::new(cart.subtotal(), currency),
        "Cart total"
    );
}

/// Add one unit of a catalog product.
pub fn add(session: &mut Session, id: &str) -> Result<(), AppError> {
    let catalog = session.catalog()?;
    let product = catalog
        .get(&ProductId::new(id))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    session.cart.increase(product);
    info!(
        id,
        quantity = session.cart.get_quantity(&product.id),
        items = session.cart.total_quantity(),
        "Added to cart"
    );
    Ok(())
}

/// Remove one unit. Unknown ids are ignored.
pub fn decrease(session: &mut Session, id: &str) {
    let product_id = ProductId::new(id);
    session.cart.decrease(&product_id);
    info!(
        id,
        quantity = session.cart.get_quantity(&product_id),
        items = session.cart.total_quantity(),
        "Decreased"
    );
}

/// Remove a product entirely. Unknown ids are ignored.
pub fn remove(session: &mut Session, id: &str) {
    session.cart.remove(&ProductId::new(id));
    info!(id, items = session.cart.total_quantity(), "Removed from cart");
}

/// Report the quantity of one product, zero if absent.
pub fn quantity(session: &Session, id: &str) {
    let quantity = session.cart.get_quantity(&ProductId::new(id));
    info!(id, quantity, "Quantity");
}

/// Empty the cart.
pub fn clear(session: &mut Session) {
    session.cart.clear();
    info!("Cart cleared");
}
