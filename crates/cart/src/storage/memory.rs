//! In-memory storage adapter.

use std::cell::{Cell, RefCell};

use super::{CartSnapshot, CartStorage, persisted};
use crate::error::StorageError;

/// Keeps the serialized envelope in memory.
///
/// Values pass through the same codec as durable adapters, so tests exercise
/// the persisted format. Share one instance between a store and the test via
/// `Rc<MemoryStorage>` or `&MemoryStorage`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    raw: RefCell<Option<String>>,
    saves: Cell<usize>,
    fail_saves: bool,
}

impl MemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a raw persisted value.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: RefCell::new(Some(raw.into())),
            ..Self::default()
        }
    }

    /// Storage whose writes always fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// The currently persisted raw value.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<CartSnapshot>, StorageError> {
        self.raw
            .borrow()
            .as_deref()
            .map(persisted::decode)
            .transpose()
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        if self.fail_saves {
            return Err(StorageError::Io(std::io::Error::other(
                "memory storage is read-only",
            )));
        }
        let raw = persisted::encode(snapshot)?;
        *self.raw.borrow_mut() = Some(raw);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storefront_core::CartLineItem;

    use super::*;

    #[test]
    fn test_load_empty_is_none() {
        assert!(MemoryStorage::new().load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        let snapshot = CartSnapshot::new(vec![CartLineItem::new("p1", 4)]);
        storage.save(&snapshot).unwrap();

        assert_eq!(storage.load().unwrap(), Some(snapshot));
        assert_eq!(storage.save_count(), 1);
    }

    #[test]
    fn test_failing_storage_keeps_previous_value() {
        let storage = MemoryStorage::failing();
        let result = storage.save(&CartSnapshot::default());
        assert!(matches!(result, Err(StorageError::Io(_))));
        assert!(storage.raw().is_none());
        assert_eq!(storage.save_count(), 0);
    }
}
