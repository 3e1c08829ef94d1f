//! Checkout page command.

use storefront_cart::{CartStorage, CartStore, CheckoutError, Order, place_order};
use storefront_core::{CatalogEntry, PaymentMethod, Price, ShippingDetails};

/// Confirmation lines shown after an order is placed.
#[must_use]
pub fn confirmation(order: &Order) -> Vec<String> {
    vec![
        "Order Confirmed!".to_string(),
        format!("Order Number: {}", order.number),
        format!("Date: {}", order.placed_at.format("%Y-%m-%d")),
        format!("Status: {}", order.status),
        format!("Payment Method: {}", order.payment_method),
        format!("Total: {}", Price::usd(order.totals.total)),
        format!(
            "Ship to: {}, {}, {} {}, {}",
            order.shipping.full_name(),
            order.shipping.address,
            order.shipping.zip_code,
            order.shipping.city,
            order.shipping.country
        ),
        format!("Confirmation sent to: {}", order.shipping.email),
    ]
}

/// Place the order and log the confirmation.
///
/// # Errors
///
/// Returns an error if the cart is empty, a shipping field is blank or the
/// payment method is not accepted.
pub fn run<S: CartStorage>(
    cart: &mut CartStore<S>,
    catalog: &[CatalogEntry],
    shipping: ShippingDetails,
    payment_method: PaymentMethod,
) -> Result<Order, CheckoutError> {
    let order = place_order(cart, catalog, shipping, payment_method)?;
    for line in confirmation(&order) {
        tracing::info!("{line}");
    }
    Ok(order)
}
