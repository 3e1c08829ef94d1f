//! Cart line item type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Chosen option per variant axis, e.g. `"Size" -> "M"`.
///
/// Ordered so that persisted carts serialize deterministically.
pub type VariantSelection = BTreeMap<String, String>;

/// One entry in the cart: a product reference and a quantity.
///
/// The persisted form uses camelCase keys:
///
/// ```json
/// {"productId": "1", "quantity": 2, "variantSelection": {"Size": "M"}}
/// ```
///
/// `variant` is accepted as an alias for `variantSelection` on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Catalog entry this line refers to.
    pub product_id: ProductId,
    /// Number of units. Expected to be at least 1; callers validate.
    pub quantity: u32,
    /// Selected variant options, absent for products without variants.
    #[serde(default, alias = "variant", skip_serializing_if = "Option::is_none")]
    pub variant_selection: Option<VariantSelection>,
}

impl CartLineItem {
    /// Create a line item without a variant selection.
    #[must_use]
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            variant_selection: None,
        }
    }

    /// Attach a variant selection. An empty selection is stored as absent.
    #[must_use]
    pub fn with_variants(mut self, selection: VariantSelection) -> Self {
        self.variant_selection = if selection.is_empty() {
            None
        } else {
            Some(selection)
        };
        self
    }
}
