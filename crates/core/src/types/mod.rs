//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod catalog;
pub mod id;
pub mod price;
pub mod shipping;
pub mod status;

pub use cart::{CartLineItem, VariantSelection};
pub use catalog::CatalogEntry;
pub use id::ProductId;
pub use price::{CurrencyCode, Price};
pub use shipping::ShippingDetails;
pub use status::*;
