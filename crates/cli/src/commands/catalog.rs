//! Catalog listing.

use storefront_core::{CatalogEntry, Price};

/// Stock threshold below which the remaining count is shown.
const LOW_STOCK_THRESHOLD: u32 = 10;

/// Stock status shown on the product page.
#[must_use]
pub fn stock_label(entry: &CatalogEntry) -> String {
    match entry.stock {
        0 => "Out of stock".to_string(),
        n if n <= LOW_STOCK_THRESHOLD => format!("Only {n} left in stock"),
        _ => "In stock".to_string(),
    }
}

/// One listing line for a catalog entry.
#[must_use]
pub fn entry_summary(entry: &CatalogEntry) -> String {
    let price = match entry.sale_price {
        Some(sale) => format!("{} (was {})", Price::usd(sale), Price::usd(entry.price)),
        None => Price::usd(entry.price).to_string(),
    };
    format!("[{}] {} - {price} - {}", entry.id, entry.name, stock_label(entry))
}

/// Log the catalog.
pub fn list(catalog: &[CatalogEntry]) {
    for entry in catalog {
        tracing::info!("{}", entry_summary(entry));
    }
}
