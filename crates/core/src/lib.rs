//! Storefront Core - Shared types library.
//!
//! This crate provides the domain types shared by the storefront components:
//! - `cart` - Cart store, pricing and checkout
//! - `cli` - Command-line front end over a file-backed cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no clocks.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product ids, cart line items, catalog entries, prices and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
