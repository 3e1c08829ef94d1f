//! Cart page commands.

use storefront_cart::pricing::{find_entry, line_total};
use storefront_cart::{CartStorage, CartStore, QuantityBounds};
use storefront_core::{CartLineItem, CatalogEntry, Price, ProductId, VariantSelection};

use super::CommandError;

/// Render the cart page: one line per item, then the totals block.
#[must_use]
pub fn summary<S: CartStorage>(cart: &CartStore<S>, catalog: &[CatalogEntry]) -> Vec<String> {
    if cart.is_empty() {
        return vec!["Your cart is empty".to_string()];
    }

    let mut lines: Vec<String> = cart
        .items()
        .iter()
        .map(|item| line_summary(item, catalog))
        .collect();

    let totals = cart.totals(catalog);
    lines.push(format!("Items: {}", cart.item_count()));
    lines.push(format!("Subtotal: {}", Price::usd(totals.subtotal)));
    lines.push(if totals.free_shipping() {
        "Shipping: Free".to_string()
    } else {
        format!("Shipping: {}", Price::usd(totals.shipping))
    });
    lines.push(format!("Estimated Tax: {}", Price::usd(totals.tax)));
    lines.push(format!("Total: {}", Price::usd(totals.total)));
    lines
}

fn line_summary(item: &CartLineItem, catalog: &[CatalogEntry]) -> String {
    let variants = item
        .variant_selection
        .as_ref()
        .map(|selection| {
            let parts: Vec<String> = selection.iter().map(|(k, v)| format!("{k}: {v}")).collect();
            format!(" ({})", parts.join(", "))
        })
        .unwrap_or_default();

    match find_entry(catalog, &item.product_id).zip(line_total(item, catalog)) {
        Some((entry, total)) => format!(
            "[{}] {}{variants} x{} @ {} = {}",
            entry.id,
            entry.name,
            item.quantity,
            Price::usd(entry.effective_price()),
            Price::usd(total),
        ),
        None => format!(
            "[{}]{variants} x{} (no longer available)",
            item.product_id, item.quantity
        ),
    }
}

/// Log the cart page.
pub fn show<S: CartStorage>(cart: &CartStore<S>, catalog: &[CatalogEntry]) {
    for line in summary(cart, catalog) {
        tracing::info!("{line}");
    }
}

/// Add `quantity` units of a product, as the product card and detail page do.
///
/// The combined quantity already in the cart plus `quantity` must fit the
/// product's stock.
///
/// # Errors
///
/// Returns an error if the product is unknown or the quantity does not fit.
pub fn add<S: CartStorage>(
    cart: &mut CartStore<S>,
    catalog: &[CatalogEntry],
    product_id: ProductId,
    quantity: u32,
    variants: Vec<(String, String)>,
) -> Result<(), CommandError> {
    let entry = find_entry(catalog, &product_id)
        .ok_or_else(|| CommandError::UnknownProduct(product_id.clone()))?;
    let bounds = QuantityBounds::for_entry(entry);

    let in_cart = cart.item(&product_id).map_or(0, |i| i.quantity);
    let combined = u64::from(in_cart) + u64::from(quantity);
    if !bounds.contains(quantity) || combined > u64::from(bounds.max()) {
        return Err(CommandError::QuantityOutOfRange {
            product_id,
            requested: combined,
            max: bounds.max(),
        });
    }

    let selection: VariantSelection = variants.into_iter().collect();
    cart.add_item(CartLineItem::new(product_id.clone(), quantity).with_variants(selection));
    tracing::info!(%product_id, quantity, "Added to cart");
    Ok(())
}

/// Set the quantity of a line already in the cart.
///
/// # Errors
///
/// Returns an error if the line or product is unknown or the quantity does
/// not fit the product's stock.
pub fn set<S: CartStorage>(
    cart: &mut CartStore<S>,
    catalog: &[CatalogEntry],
    product_id: &ProductId,
    quantity: u32,
) -> Result<(), CommandError> {
    let (_, bounds) = line_bounds(cart, catalog, product_id)?;
    if !bounds.contains(quantity) {
        return Err(CommandError::QuantityOutOfRange {
            product_id: product_id.clone(),
            requested: u64::from(quantity),
            max: bounds.max(),
        });
    }
    cart.update_quantity(product_id, quantity);
    tracing::info!(%product_id, quantity, "Updated quantity");
    Ok(())
}

/// Step a line's quantity up by one, as the cart page "+" control does.
///
/// # Errors
///
/// Returns an error if the line or product is unknown or the line is already
/// at the product's stock.
pub fn increment<S: CartStorage>(
    cart: &mut CartStore<S>,
    catalog: &[CatalogEntry],
    product_id: &ProductId,
) -> Result<(), CommandError> {
    let (current, bounds) = line_bounds(cart, catalog, product_id)?;
    if !bounds.can_increment(current) {
        return Err(CommandError::AtLimit {
            product_id: product_id.clone(),
            quantity: current,
        });
    }
    cart.update_quantity(product_id, current + 1);
    Ok(())
}

/// Step a line's quantity down by one, as the cart page "-" control does.
///
/// # Errors
///
/// Returns an error if the line or product is unknown or the line is already
/// at one unit.
pub fn decrement<S: CartStorage>(
    cart: &mut CartStore<S>,
    catalog: &[CatalogEntry],
    product_id: &ProductId,
) -> Result<(), CommandError> {
    let (current, bounds) = line_bounds(cart, catalog, product_id)?;
    if !bounds.can_decrement(current) {
        return Err(CommandError::AtLimit {
            product_id: product_id.clone(),
            quantity: current,
        });
    }
    cart.update_quantity(product_id, current - 1);
    Ok(())
}

/// Remove a line. Unknown ids are ignored.
pub fn remove<S: CartStorage>(cart: &mut CartStore<S>, product_id: &ProductId) {
    cart.remove_item(product_id);
    tracing::info!(%product_id, "Removed from cart");
}

/// Empty the cart.
pub fn clear<S: CartStorage>(cart: &mut CartStore<S>) {
    cart.clear_cart();
    tracing::info!("Cart cleared");
}

fn line_bounds<S: CartStorage>(
    cart: &CartStore<S>,
    catalog: &[CatalogEntry],
    product_id: &ProductId,
) -> Result<(u32, QuantityBounds), CommandError> {
    let current = cart
        .item(product_id)
        .map(|i| i.quantity)
        .ok_or_else(|| CommandError::NotInCart(product_id.clone()))?;
    let entry = find_entry(catalog, product_id)
        .ok_or_else(|| CommandError::UnknownProduct(product_id.clone()))?;
    Ok((current, QuantityBounds::for_entry(entry)))
}
