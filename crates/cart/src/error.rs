//! Error types for cart persistence and checkout.
//!
//! Cart mutations themselves never fail. These errors surface only from the
//! persistence port and from order placement.

use storefront_core::PaymentMethod;
use thiserror::Error;

/// Errors raised by a [`CartStorage`](crate::storage::CartStorage) adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing store failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted value is not a valid cart envelope.
    #[error("Invalid persisted cart: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The persisted value was written by a newer format.
    #[error("Unsupported persisted cart version {found} (supported up to {supported})")]
    UnsupportedVersion {
        /// Version found in the envelope.
        found: u32,
        /// Highest version this build reads.
        supported: u32,
    },
}

/// Errors raised when placing an order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to check out.
    #[error("Cart is empty")]
    EmptyCart,

    /// Required contact or shipping fields were left blank.
    #[error("Missing checkout details: {}", .0.join(", "))]
    MissingDetails(Vec<&'static str>),

    /// The selected payment method is listed but not accepted.
    #[error("Payment method not available: {0}")]
    PaymentMethodUnavailable(PaymentMethod),
}
