//! Persistence port for the cart.
//!
//! The store saves a full [`CartSnapshot`] after every mutation and loads one
//! when a session opens. Adapters decide where the bytes live:
//!
//! - [`MemoryStorage`] - in-process fake for tests
//! - [`FileStorage`] - one JSON file per namespace key in a directory
//!
//! Both write the envelope defined in [`persisted`].

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use storefront_core::CartLineItem;

use crate::error::StorageError;

pub mod file;
pub mod memory;
pub mod persisted;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Fixed namespace key the cart is persisted under.
pub const STORAGE_KEY: &str = "cart-storage";

/// The persisted portion of the cart state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    #[serde(default)]
    pub items: Vec<CartLineItem>,
}

impl CartSnapshot {
    /// Snapshot of the given items.
    #[must_use]
    pub const fn new(items: Vec<CartLineItem>) -> Self {
        Self { items }
    }
}

/// Durable storage for a single cart.
pub trait CartStorage {
    /// Load the persisted snapshot, or `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read or holds a value
    /// that is not a readable cart.
    fn load(&self) -> Result<Option<CartSnapshot>, StorageError>;

    /// Replace the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for &S {
    fn load(&self) -> Result<Option<CartSnapshot>, StorageError> {
        (**self).load()
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        (**self).save(snapshot)
    }
}

impl<S: CartStorage + ?Sized> CartStorage for Rc<S> {
    fn load(&self) -> Result<Option<CartSnapshot>, StorageError> {
        (**self).load()
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        (**self).save(snapshot)
    }
}
