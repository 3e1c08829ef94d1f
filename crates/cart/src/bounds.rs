//! Quantity bounds for callers of the cart store.
//!
//! The store accepts any quantity it is given. Surfaces that let a shopper
//! pick a quantity check it here first: at least one unit, at most the stock.

use storefront_core::CatalogEntry;

/// Inclusive range of quantities a shopper may select for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityBounds {
    min: u32,
    max: u32,
}

impl QuantityBounds {
    /// Smallest quantity a line may hold.
    pub const MIN: u32 = 1;

    /// Bounds for a catalog entry: `1..=stock`.
    #[must_use]
    pub const fn for_entry(entry: &CatalogEntry) -> Self {
        Self {
            min: Self::MIN,
            max: entry.stock,
        }
    }

    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Whether `quantity` may be selected. Always false when out of stock.
    #[must_use]
    pub const fn contains(&self, quantity: u32) -> bool {
        quantity >= self.min && quantity <= self.max
    }

    /// Whether the "+" control is enabled at `current`.
    #[must_use]
    pub const fn can_increment(&self, current: u32) -> bool {
        current < self.max
    }

    /// Whether the "-" control is enabled at `current`.
    #[must_use]
    pub const fn can_decrement(&self, current: u32) -> bool {
        current > self.min
    }
}
