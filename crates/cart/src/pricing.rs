//! Cart pricing.
//!
//! The subtotal is a pure function of the cart lines and the catalog. Lines
//! whose product is missing from the catalog contribute nothing, since the
//! catalog is loaded independently and may lag behind a persisted cart.
//!
//! Shipping and tax derive from the subtotal with fixed business constants.
//!
//! Nothing here panics on overflow. A line or sum that exceeds the decimal
//! range saturates at [`Decimal::MAX`].

use rust_decimal::Decimal;
use serde::Serialize;
use storefront_core::{CartLineItem, CatalogEntry, ProductId};

/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;

/// Shipping charged at or below [`FREE_SHIPPING_THRESHOLD`].
pub const FLAT_SHIPPING_FEE: Decimal = Decimal::TEN;

/// Tax as a fraction of the subtotal (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Look up a catalog entry by id.
#[must_use]
pub fn find_entry<'a>(catalog: &'a [CatalogEntry], id: &ProductId) -> Option<&'a CatalogEntry> {
    catalog.iter().find(|entry| &entry.id == id)
}

/// Effective price times quantity, or `None` if the product is not in the catalog.
#[must_use]
pub fn line_total(item: &CartLineItem, catalog: &[CatalogEntry]) -> Option<Decimal> {
    let entry = find_entry(catalog, &item.product_id)?;
    let total = entry
        .effective_price()
        .checked_mul(Decimal::from(item.quantity))
        .unwrap_or_else(|| {
            tracing::warn!(
                product_id = %item.product_id,
                quantity = item.quantity,
                "Line total overflowed, saturating"
            );
            Decimal::MAX
        });
    Some(total)
}

/// Sum of [`line_total`] over every line that resolves in the catalog.
#[must_use]
pub fn subtotal(items: &[CartLineItem], catalog: &[CatalogEntry]) -> Decimal {
    items
        .iter()
        .filter_map(|item| line_total(item, catalog))
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Shipping for a subtotal.
#[must_use]
pub fn shipping_for(subtotal: Decimal) -> Decimal {
    if subtotal > FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        FLAT_SHIPPING_FEE
    }
}

/// Tax for a subtotal.
#[must_use]
pub fn tax_for(subtotal: Decimal) -> Decimal {
    subtotal * TAX_RATE
}

/// Totals shown on the cart and checkout pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    /// Derive shipping, tax and grand total from a subtotal.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let shipping = shipping_for(subtotal);
        let tax = tax_for(subtotal);
        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal.saturating_add(shipping).saturating_add(tax),
        }
    }

    /// Whether the order qualifies for free shipping.
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}
