//! Catalog entry type.
//!
//! The catalog is owned by the surrounding application and handed to the cart
//! read-only. Only the fields needed for pricing and stock checks are modeled.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product as seen by the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: ProductId,
    /// Display name. Not used for pricing.
    #[serde(default)]
    pub name: String,
    /// Base price in the store currency's standard unit.
    pub price: Decimal,
    /// Discounted price, when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Decimal>,
    /// Units available.
    pub stock: u32,
}

impl CatalogEntry {
    /// Create an entry with no sale price.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, price: Decimal, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            price,
            sale_price: None,
            stock,
        }
    }

    /// Set the sale price.
    #[must_use]
    pub fn with_sale_price(mut self, sale_price: Decimal) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The sale price if present, otherwise the base price.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.sale_price.unwrap_or(self.price)
    }

    /// Whether any units are available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
