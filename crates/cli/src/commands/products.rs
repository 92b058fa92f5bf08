//! Catalog browsing commands.

use shopkeep_core::{Price, Product, ProductId};
use shopkeep_storefront::AppError;
use tracing::info;

use super::Session;

fn log_product(session: &Session, product: &Product) {
    let price = Price::new(product.price, session.config.pricing.currency);
    info!(
        id = %product.id,
        name = %product.name,
        price = %price,
        category = product.category_name().unwrap_or("-"),
        in_cart = session.cart.get_quantity(&product.id),
        "Product"
    );
}

/// List every product in catalog order.
pub fn list(session: &Session) -> Result<(), AppError> {
    let catalog = session.catalog()?;
    for product in catalog.iter() {
        log_product(session, product);
    }
    info!(count = catalog.len(), "Catalog listed");
    Ok(())
}

/// Show a single product with its description.
pub fn show(session: &Session, id: &str) -> Result<(), AppError> {
    let catalog = session.catalog()?;
    let product = catalog
        .get(&ProductId::new(id))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    log_product(session, product);
    if !product.description.is_empty() {
        info!(description = %product.description, "Description");
    }
    if !product.manufacturer.is_empty() {
        info!(manufacturer = %product.manufacturer, "Manufacturer");
    }
    Ok(())
}

/// Case-insensitive search over name, manufacturer, and category.
pub fn search(session: &Session, query: &str) -> Result<(), AppError> {
    let catalog = session.catalog()?;
    let matches = catalog.search(query);
    for product in &matches {
        log_product(session, product);
    }
    info!(query, count = matches.len(), "Search complete");
    Ok(())
}
