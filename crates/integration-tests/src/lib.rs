//! Integration tests for the storefront cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storefront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Carts surviving across sessions on disk
//! - `checkout_flow` - Browse, edit and check out through the public API
//!
//! Each test works in its own `tempfile` directory. The helpers below provide
//! the shared catalog and checkout details.

#![cfg_attr(not(test), forbid(unsafe_code))]

use rust_decimal::Decimal;
use storefront_core::{CatalogEntry, ShippingDetails};

/// Catalog used across the integration tests.
#[must_use]
pub fn sample_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("1", Decimal::new(2999, 2), 100)
            .with_sale_price(Decimal::new(2499, 2))
            .with_name("T-shirt Premium"),
        CatalogEntry::new("2", Decimal::new(89_999, 2), 50).with_name("Smartphone XL Pro"),
        CatalogEntry::new("3", Decimal::new(8999, 2), 30)
            .with_sale_price(Decimal::new(6999, 2))
            .with_name("Lampe Design"),
        CatalogEntry::new("4", Decimal::new(4999, 2), 80).with_name("Tapis de Yoga Premium"),
    ]
}

/// A fully filled-in checkout form.
#[must_use]
pub fn sample_shipping() -> ShippingDetails {
    ShippingDetails {
        email: "camille@example.com".to_string(),
        first_name: "Camille".to_string(),
        last_name: "Durand".to_string(),
        address: "8 avenue Foch".to_string(),
        city: "Paris".to_string(),
        zip_code: "75016".to_string(),
        country: "France".to_string(),
    }
}
