//! Order placement.
//!
//! Checkout snapshots the cart, its totals and the shopper's shipping details
//! into an [`Order`], then clears the cart. No payment is taken; the order is
//! the confirmation shown to the shopper.

use core::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use storefront_core::{CartLineItem, CatalogEntry, OrderStatus, PaymentMethod, ShippingDetails};
use tracing::instrument;

use crate::error::CheckoutError;
use crate::pricing::OrderTotals;
use crate::storage::CartStorage;
use crate::store::CartStore;

/// Human-facing order reference, `WZ-` followed by six digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    pub const PREFIX: &'static str = "WZ-";

    /// Draw a fresh order number from `rng`.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let n: u32 = rng.random_range(100_000..=999_999);
        Self(format!("{}{n}", Self::PREFIX))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub number: OrderNumber,
    pub items: Vec<CartLineItem>,
    pub totals: OrderTotals,
    pub shipping: ShippingDetails,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub placed_at: DateTime<Utc>,
}

/// Place an order for the current cart contents and clear the cart.
///
/// # Errors
///
/// Checked in checkout step order:
///
/// - [`CheckoutError::EmptyCart`] if there is nothing to order
/// - [`CheckoutError::MissingDetails`] if a contact or shipping field is blank
/// - [`CheckoutError::PaymentMethodUnavailable`] if the payment method is not
///   accepted
///
/// The cart is left untouched on error.
#[instrument(skip(store, catalog, shipping))]
pub fn place_order<S: CartStorage>(
    store: &mut CartStore<S>,
    catalog: &[CatalogEntry],
    shipping: ShippingDetails,
    payment_method: PaymentMethod,
) -> Result<Order, CheckoutError> {
    if store.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let missing = shipping.missing_fields();
    if !missing.is_empty() {
        return Err(CheckoutError::MissingDetails(missing));
    }
    if !payment_method.is_available() {
        return Err(CheckoutError::PaymentMethodUnavailable(payment_method));
    }

    let order = Order {
        number: OrderNumber::generate(&mut rand::rng()),
        items: store.items().to_vec(),
        totals: store.totals(catalog),
        shipping,
        status: OrderStatus::Processing,
        payment_method,
        placed_at: Utc::now(),
    };

    store.clear_cart();

    tracing::info!(
        order_number = %order.number,
        lines = order.items.len(),
        total = %order.totals.total,
        "Order placed"
    );
    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::MemoryStorage;

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            email: "claire@example.com".to_string(),
            first_name: "Claire".to_string(),
            last_name: "Martin".to_string(),
            address: "12 rue des Lilas".to_string(),
            city: "Lyon".to_string(),
            zip_code: "69003".to_string(),
            country: "France".to_string(),
        }
    }

    fn catalog() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("1", Decimal::new(2999, 2), 100).with_sale_price(Decimal::new(2499, 2)),
            CatalogEntry::new("2", Decimal::new(89_999, 2), 50),
        ]
    }

    #[test]
    fn test_order_number_format() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let number = OrderNumber::generate(&mut rng);
            let digits = number.as_str().strip_prefix("WZ-").unwrap();
            assert_eq!(digits.len(), 6);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
            assert!(!digits.starts_with('0'));
        }
    }

    #[test]
    fn test_place_order_snapshots_and_clears() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(&storage);
        cart.add_item(CartLineItem::new("1", 2));

        let order =
            place_order(&mut cart, &catalog(), shipping(), PaymentMethod::CreditCard).unwrap();

        assert!(cart.is_empty());
        assert_eq!(order.shipping, shipping());
        assert_eq!(order.payment_method, PaymentMethod::CreditCard);
        assert_eq!(order.items, vec![CartLineItem::new("1", 2)]);
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.totals.subtotal, Decimal::new(4998, 2));
        assert_eq!(order.totals.shipping, Decimal::TEN);
        assert_eq!(order.totals.tax, Decimal::new(4998, 3));
        assert_eq!(order.totals.total, Decimal::new(64_978, 3));

        let reopened = CartStore::open(&storage);
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_place_order_empty_cart() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(&storage);
        let err =
            place_order(&mut cart, &catalog(), shipping(), PaymentMethod::CreditCard).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn test_place_order_missing_details_keeps_cart() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(&storage);
        cart.add_item(CartLineItem::new("1", 1));
        let details = ShippingDetails {
            email: String::new(),
            country: " ".to_string(),
            ..shipping()
        };

        let err = place_order(&mut cart, &catalog(), details, PaymentMethod::CreditCard).unwrap_err();

        assert_eq!(err, CheckoutError::MissingDetails(vec!["email", "country"]));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_place_order_details_checked_before_payment_method() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(&storage);
        cart.add_item(CartLineItem::new("1", 1));

        let err = place_order(
            &mut cart,
            &catalog(),
            ShippingDetails::default(),
            PaymentMethod::ApplePay,
        )
        .unwrap_err();

        assert!(matches!(err, CheckoutError::MissingDetails(_)));
    }

    #[test]
    fn test_place_order_unavailable_method_keeps_cart() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(&storage);
        cart.add_item(CartLineItem::new("2", 1));

        for method in [PaymentMethod::Paypal, PaymentMethod::ApplePay] {
            let err = place_order(&mut cart, &catalog(), shipping(), method).unwrap_err();
            assert_eq!(err, CheckoutError::PaymentMethodUnavailable(method));
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(storage.save_count(), 1);
    }
}
