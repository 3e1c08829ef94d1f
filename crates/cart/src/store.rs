//! The cart store.
//!
//! A [`CartStore`] is the per-session context object that owns the cart's line
//! items. UI surfaces borrow it to mutate the cart; every mutation is written
//! through to the injected [`CartStorage`] before the call returns.
//!
//! The store is deliberately thin: it never validates quantities against
//! stock and never rejects a value. Callers check [`QuantityBounds`] first.
//!
//! [`QuantityBounds`]: crate::bounds::QuantityBounds

use rust_decimal::Decimal;
use storefront_core::{CartLineItem, CatalogEntry, ProductId};

use crate::error::StorageError;
use crate::pricing::{self, OrderTotals};
use crate::storage::{CartSnapshot, CartStorage};

/// Authoritative, persisted set of cart line items.
///
/// Holds at most one line per product id.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    items: Vec<CartLineItem>,
    storage: S,
    read_only: bool,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the session's cart from `storage`.
    ///
    /// Starts empty if nothing was persisted or the persisted value cannot be
    /// read. Duplicate product lines in the persisted value are merged.
    ///
    /// A cart written by a newer format version is left in place: the session
    /// starts empty and is [read-only](Self::is_read_only), so mutations apply
    /// in memory but are never saved over it. Any other unreadable value is
    /// replaced on the first mutation.
    pub fn open(storage: S) -> Self {
        let mut read_only = false;
        let items = match storage.load() {
            Ok(Some(snapshot)) => reconcile(snapshot.items),
            Ok(None) => Vec::new(),
            Err(e @ StorageError::UnsupportedVersion { .. }) => {
                tracing::warn!(
                    error = %e,
                    "Persisted cart is from a newer version, starting empty without saving"
                );
                read_only = true;
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load persisted cart, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(lines = items.len(), read_only, "Opened cart");
        Self {
            items,
            storage,
            read_only,
        }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// The line for `product_id`, if any.
    #[must_use]
    pub fn item(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines, as shown on the header badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Whether mutations skip persistence because the stored cart is newer
    /// than this build can read.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// The storage adapter backing this cart.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Add a line, or increase the quantity of the existing line for the
    /// same product.
    ///
    /// When merging, the existing line's variant selection is kept and the
    /// incoming one is ignored.
    pub fn add_item(&mut self, item: CartLineItem) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == item.product_id)
        {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            tracing::debug!(
                product_id = %existing.product_id,
                quantity = existing.quantity,
                "Merged item into existing cart line"
            );
        } else {
            tracing::debug!(
                product_id = %item.product_id,
                quantity = item.quantity,
                "Added item to cart"
            );
            self.items.push(item);
        }
        self.persist();
    }

    /// Remove the line for `product_id`. Absent ids are ignored.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        let before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        let removed = before != self.items.len();
        tracing::debug!(%product_id, removed, "Removed item from cart");
        self.persist();
    }

    /// Overwrite the quantity of the line for `product_id`.
    ///
    /// The value is not clamped or checked against stock.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|i| &i.product_id == product_id) {
            item.quantity = quantity;
            tracing::debug!(%product_id, quantity, "Updated cart quantity");
        }
        self.persist();
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        tracing::debug!("Cleared cart");
        self.persist();
    }

    /// Sum of effective price times quantity over lines found in `catalog`.
    #[must_use]
    pub fn get_total(&self, catalog: &[CatalogEntry]) -> Decimal {
        pricing::subtotal(&self.items, catalog)
    }

    /// Subtotal with shipping and tax applied.
    #[must_use]
    pub fn totals(&self, catalog: &[CatalogEntry]) -> OrderTotals {
        OrderTotals::from_subtotal(self.get_total(catalog))
    }

    /// Price of a single line, or `None` if the line or product is unknown.
    #[must_use]
    pub fn line_total(&self, product_id: &ProductId, catalog: &[CatalogEntry]) -> Option<Decimal> {
        self.item(product_id)
            .and_then(|item| pricing::line_total(item, catalog))
    }

    fn persist(&self) {
        if self.read_only {
            tracing::debug!("Cart is read-only, skipping save");
            return;
        }
        let snapshot = CartSnapshot::new(self.items.clone());
        if let Err(e) = self.storage.save(&snapshot) {
            tracing::error!(error = %e, "Failed to persist cart");
        }
    }
}

/// Merge duplicate product lines into their first occurrence.
fn reconcile(items: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut merged: Vec<CartLineItem> = Vec::with_capacity(items.len());
    for item in items {
        match merged.iter_mut().find(|m| m.product_id == item.product_id) {
            Some(existing) => {
                tracing::debug!(
                    product_id = %item.product_id,
                    "Merged duplicate persisted cart line"
                );
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => merged.push(item),
        }
    }
    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::rc::Rc;

    use storefront_core::VariantSelection;

    use super::*;
    use crate::storage::MemoryStorage;

    fn variants(axis: &str, option: &str) -> VariantSelection {
        VariantSelection::from([(axis.to_string(), option.to_string())])
    }

    fn open() -> (CartStore<Rc<MemoryStorage>>, Rc<MemoryStorage>) {
        let storage = Rc::new(MemoryStorage::new());
        (CartStore::open(Rc::clone(&storage)), storage)
    }

    #[test]
    fn test_open_empty() {
        let (cart, storage) = open();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn test_add_merges_same_product() {
        let (mut cart, _) = open();
        cart.add_item(CartLineItem::new("p1", 2));
        cart.add_item(CartLineItem::new("p1", 3));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item(&"p1".into()).unwrap().quantity, 5);
    }

    #[test]
    fn test_add_appends_in_insertion_order() {
        let (mut cart, _) = open();
        cart.add_item(CartLineItem::new("b", 1));
        cart.add_item(CartLineItem::new("a", 1));

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_add_merge_ignores_incoming_variant_selection() {
        // Lines are keyed by product id alone: a second size of the same
        // product lands on the first line and keeps the first size.
        let (mut cart, _) = open();
        cart.add_item(CartLineItem::new("p1", 1).with_variants(variants("Size", "S")));
        cart.add_item(CartLineItem::new("p1", 2).with_variants(variants("Size", "XL")));

        assert_eq!(cart.len(), 1);
        let line = cart.item(&"p1".into()).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.variant_selection, Some(variants("Size", "S")));
    }

    #[test]
    fn test_add_has_no_upper_bound() {
        let (mut cart, _) = open();
        cart.add_item(CartLineItem::new("p1", 1_000));
        cart.add_item(CartLineItem::new("p1", 1_000));
        assert_eq!(cart.item(&"p1".into()).unwrap().quantity, 2_000);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (mut cart, _) = open();
        cart.add_item(CartLineItem::new("p1", 2));
        let before = cart.items().to_vec();

        cart.remove_item(&"missing".into());

        assert_eq!(cart.items(), before.as_slice());
    }

    #[test]
    fn test_remove_present() {
        let (mut cart, _) = open();
        cart.add_item(CartLineItem::new("p1", 2));
        cart.add_item(CartLineItem::new("p2", 1));

        cart.remove_item(&"p1".into());

        assert_eq!(cart.len(), 1);
        assert!(cart.item(&"p1".into()).is_none());
    }

    #[test]
    fn test_update_quantity_overwrites_without_validation() {
        let (mut cart, _) = open();
        cart.add_item(CartLineItem::new("p1", 2));

        cart.update_quantity(&"p1".into(), 7);
        assert_eq!(cart.item(&"p1".into()).unwrap().quantity, 7);

        cart.update_quantity(&"p1".into(), 0);
        assert_eq!(cart.item(&"p1".into()).unwrap().quantity, 0);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_update_quantity_absent_is_noop() {
        let (mut cart, _) = open();
        cart.add_item(CartLineItem::new("p1", 2));
        cart.update_quantity(&"p2".into(), 9);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item(&"p1".into()).unwrap().quantity, 2);
    }

    #[test]
    fn test_clear_empties_cart() {
        let (mut cart, _) = open();
        cart.add_item(CartLineItem::new("p1", 2));
        cart.add_item(CartLineItem::new("p2", 1));
        cart.add_item(CartLineItem::new("p1", 1));

        cart.clear_cart();

        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_every_mutation_persists() {
        let (mut cart, storage) = open();
        cart.add_item(CartLineItem::new("p1", 2));
        cart.update_quantity(&"p1".into(), 3);
        cart.remove_item(&"p9".into());
        cart.clear_cart();
        assert_eq!(storage.save_count(), 4);
    }

    #[test]
    fn test_reopen_restores_items() {
        let storage = Rc::new(MemoryStorage::new());
        {
            let mut cart = CartStore::open(Rc::clone(&storage));
            cart.add_item(CartLineItem::new("p1", 2).with_variants(variants("Size", "M")));
            cart.add_item(CartLineItem::new("p2", 1));
        }

        let cart = CartStore::open(Rc::clone(&storage));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(
            cart.item(&"p1".into()).unwrap().variant_selection,
            Some(variants("Size", "M"))
        );
    }

    #[test]
    fn test_open_merges_duplicate_persisted_lines() {
        let storage = MemoryStorage::with_raw(
            r#"{"state":{"items":[
                {"productId":"p1","quantity":1,"variantSelection":{"Size":"S"}},
                {"productId":"p2","quantity":4},
                {"productId":"p1","quantity":2,"variantSelection":{"Size":"L"}}
            ]},"version":1}"#,
        );
        let cart = CartStore::open(&storage);

        assert_eq!(cart.len(), 2);
        let line = cart.item(&"p1".into()).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.variant_selection, Some(variants("Size", "S")));
    }

    #[test]
    fn test_open_corrupt_storage_starts_empty() {
        let storage = MemoryStorage::with_raw("{\"state\":");
        let cart = CartStore::open(&storage);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_open_newer_version_never_overwrites() {
        let raw = r#"{"state":{"items":[{"productId":"p1","quantity":1}]},"version":2}"#;
        let storage = MemoryStorage::with_raw(raw);
        let mut cart = CartStore::open(&storage);
        assert!(cart.is_empty());
        assert!(cart.is_read_only());

        cart.add_item(CartLineItem::new("p2", 1));
        cart.clear_cart();

        assert_eq!(storage.save_count(), 0);
        assert_eq!(storage.raw().as_deref(), Some(raw));
    }

    #[test]
    fn test_open_corrupt_storage_is_replaced() {
        let storage = MemoryStorage::with_raw("not json");
        let mut cart = CartStore::open(&storage);
        assert!(!cart.is_read_only());

        cart.add_item(CartLineItem::new("p1", 1));

        assert_eq!(storage.save_count(), 1);
        assert_eq!(CartStore::open(&storage).len(), 1);
    }

    #[test]
    fn test_get_total_saturates_instead_of_panicking() {
        let (mut cart, _) = open();
        let price = Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0);
        let catalog = vec![CatalogEntry::new("p1", price, 10)];
        cart.add_item(CartLineItem::new("p1", u32::MAX));
        cart.add_item(CartLineItem::new("p1", 1));

        assert_eq!(cart.item(&"p1".into()).unwrap().quantity, u32::MAX);
        assert_eq!(cart.get_total(&catalog), Decimal::MAX);
        assert_eq!(cart.totals(&catalog).total, Decimal::MAX);
    }

    #[test]
    fn test_save_failure_does_not_fail_mutation() {
        let storage = MemoryStorage::failing();
        let mut cart = CartStore::open(&storage);

        cart.add_item(CartLineItem::new("p1", 1));

        assert_eq!(cart.len(), 1);
        assert!(storage.raw().is_none());
    }

    #[test]
    fn test_get_total() {
        let (mut cart, _) = open();
        let catalog = vec![
            CatalogEntry::new("p1", Decimal::from(100), 10).with_sale_price(Decimal::from(80)),
        ];
        cart.add_item(CartLineItem::new("p1", 2));

        assert_eq!(cart.get_total(&catalog), Decimal::from(160));
        assert_eq!(cart.get_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_totals_and_line_total() {
        let (mut cart, _) = open();
        let catalog = vec![
            CatalogEntry::new("p1", Decimal::from(30), 10),
            CatalogEntry::new("p2", Decimal::from(60), 10),
        ];
        cart.add_item(CartLineItem::new("p1", 2));
        cart.add_item(CartLineItem::new("p2", 1));

        let totals = cart.totals(&catalog);
        assert_eq!(totals.subtotal, Decimal::from(120));
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::new(1320, 1));

        assert_eq!(cart.line_total(&"p1".into(), &catalog), Some(Decimal::from(60)));
        assert_eq!(cart.line_total(&"p3".into(), &catalog), None);
    }
}
