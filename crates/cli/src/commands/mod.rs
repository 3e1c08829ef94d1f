//! Command implementations.
//!
//! Each command plays the part of one storefront surface: the product card
//! and detail page (`add`), the cart page (`show`, `set`, `inc`, `dec`,
//! `remove`, `clear`), the checkout page (`checkout`) and the catalog
//! listing (`catalog`). Quantity checks happen here, never in the store.

use storefront_core::ProductId;
use thiserror::Error;

pub mod cart;
pub mod catalog;
pub mod checkout;

/// Errors raised by cart commands before the store is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Product not found in catalog: {0}")]
    UnknownProduct(ProductId),

    #[error("Product is not in the cart: {0}")]
    NotInCart(ProductId),

    #[error("Quantity {requested} for {product_id} is out of range (1..={max})")]
    QuantityOutOfRange {
        product_id: ProductId,
        requested: u64,
        max: u32,
    },

    #[error("Quantity for {product_id} is already at its limit ({quantity})")]
    AtLimit { product_id: ProductId, quantity: u32 },
}

/// Parse a variant selection argument of the form `Axis=Option`.
///
/// # Errors
///
/// Returns a message if either side of the `=` is missing.
pub fn parse_variant(s: &str) -> Result<(String, String), String> {
    let (axis, option) = s
        .split_once('=')
        .ok_or_else(|| format!("expected AXIS=OPTION, got '{s}'"))?;
    let (axis, option) = (axis.trim(), option.trim());
    if axis.is_empty() || option.is_empty() {
        return Err(format!("expected AXIS=OPTION, got '{s}'"));
    }
    Ok((axis.to_string(), option.to_string()))
}
