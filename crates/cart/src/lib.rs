//! Storefront Cart - persisted cart state and pricing.
//!
//! # Architecture
//!
//! A [`CartStore`] is constructed once per session around a [`CartStorage`]
//! adapter and passed by reference to whatever surfaces show or edit the
//! cart. The catalog stays outside the store and is handed in read-only
//! whenever totals are computed.
//!
//! # Modules
//!
//! - [`store`] - The cart store and its mutators
//! - [`pricing`] - Subtotal, shipping and tax
//! - [`storage`] - Persistence port, versioned envelope, memory and file adapters
//! - [`bounds`] - Quantity checks for callers
//! - [`checkout`] - Order placement
//! - [`error`] - Storage and checkout errors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod bounds;
pub mod checkout;
pub mod error;
pub mod pricing;
pub mod storage;
pub mod store;

pub use bounds::QuantityBounds;
pub use checkout::{Order, OrderNumber, place_order};
pub use error::{CheckoutError, StorageError};
pub use pricing::OrderTotals;
pub use storage::{CartSnapshot, CartStorage, FileStorage, MemoryStorage, STORAGE_KEY};
pub use store::CartStore;
