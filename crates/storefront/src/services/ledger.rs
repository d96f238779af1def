//! Per-store product selection counts.
//!
//! The ledger only records product IDs and quantities. It is resolved
//! against the selected store's catalog entries when the cart is opened.

use indexmap::IndexMap;
use lastbite_core::ProductId;

use crate::models::{CartError, CartLine, Store};

/// Selected quantity per product, in order of first selection.
///
/// Every stored quantity is at least 1. A product whose quantity would
/// reach zero is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartLedger {
    entries: IndexMap<ProductId, u32>,
}

impl CartLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit, creating the entry at 1 if absent.
    ///
    /// Returns the new quantity.
    pub fn increment(&mut self, id: &ProductId) -> u32 {
        let quantity = self.entries.entry(id.clone()).or_insert(0);
        *quantity = quantity.saturating_add(1);
        let quantity = *quantity;
        tracing::debug!(product_id = %id, quantity, "Ledger incremented");
        quantity
    }

    /// Remove one unit. At quantity 1 the entry is removed; absent IDs are ignored.
    ///
    /// Returns the remaining quantity (0 once removed or if never present).
    pub fn decrement(&mut self, id: &ProductId) -> u32 {
        match self.entries.get(id).copied() {
            Some(quantity) if quantity > 1 => {
                let remaining = quantity - 1;
                self.entries.insert(id.clone(), remaining);
                tracing::debug!(product_id = %id, quantity = remaining, "Ledger decremented");
                remaining
            }
            Some(_) => {
                self.entries.shift_remove(id);
                tracing::debug!(product_id = %id, "Ledger entry removed");
                0
            }
            None => 0,
        }
    }

    /// Set an absolute quantity. Zero or negative removes the entry.
    ///
    /// Returns the stored quantity.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> u32 {
        if quantity <= 0 {
            self.entries.shift_remove(id);
            tracing::debug!(product_id = %id, "Ledger entry removed");
            return 0;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.entries.insert(id.clone(), quantity);
        tracing::debug!(product_id = %id, quantity, "Ledger quantity set");
        quantity
    }

    /// Current quantity for a product, or 0.
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> u32 {
        self.entries.get(id).copied().unwrap_or(0)
    }

    /// Sum of all quantities, for the cart badge.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.entries.values().map(|&q| u64::from(q)).sum()
    }

    /// Number of distinct products selected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every selection.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// `(id, quantity)` pairs in selection order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, u32)> {
        self.entries.iter().map(|(id, &q)| (id, q))
    }

    /// Resolve every entry against `store`, in selection order.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] for the first entry the store
    /// does not carry. Entries are never skipped.
    pub fn to_line_items(&self, store: &Store) -> Result<Vec<CartLine>, CartError> {
        self.entries
            .iter()
            .map(|(id, &quantity)| {
                let product = store.product(id).ok_or_else(|| {
                    tracing::error!(
                        product_id = %id,
                        store_id = %store.id,
                        "Ledger references a product missing from the store"
                    );
                    CartError::ProductNotFound {
                        product_id: id.clone(),
                        store_id: store.id.clone(),
                    }
                })?;
                Ok(CartLine::new(product.clone(), quantity))
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, Utc};
    use lastbite_core::StoreId;
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::Product;

    fn id(raw: &str) -> ProductId {
        ProductId::new(raw)
    }

    fn store(product_ids: &[&str]) -> Store {
        Store {
            id: StoreId::new("1"),
            name: "甜點天堂".to_string(),
            image: String::new(),
            products: product_ids
                .iter()
                .map(|raw| Product {
                    id: id(raw),
                    name: format!("Product {raw}"),
                    price: Decimal::from(10),
                    original_price: Decimal::from(20),
                    expiry_date: DateTime::<Utc>::UNIX_EPOCH,
                    image: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_increment_creates_then_counts() {
        let mut ledger = CartLedger::new();
        assert_eq!(ledger.increment(&id("1")), 1);
        assert_eq!(ledger.increment(&id("1")), 2);
        assert_eq!(ledger.quantity(&id("1")), 2);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_decrement_at_one_removes_entry() {
        let mut ledger = CartLedger::new();
        ledger.increment(&id("1"));
        assert_eq!(ledger.decrement(&id("1")), 0);
        assert!(ledger.is_empty());
        assert_eq!(ledger.iter().count(), 0);
    }

    #[test]
    fn test_decrement_absent_is_noop() {
        let mut ledger = CartLedger::new();
        ledger.increment(&id("2"));
        assert_eq!(ledger.decrement(&id("1")), 0);
        assert_eq!(ledger.quantity(&id("1")), 0);
        assert_eq!(ledger.total_item_count(), 1);
    }

    #[test]
    fn test_total_item_count() {
        let mut ledger = CartLedger::new();
        assert_eq!(ledger.total_item_count(), 0);
        ledger.increment(&id("1"));
        ledger.increment(&id("1"));
        ledger.increment(&id("2"));
        assert_eq!(ledger.total_item_count(), 3);
    }

    #[test]
    fn test_set_quantity() {
        let mut ledger = CartLedger::new();
        assert_eq!(ledger.set_quantity(&id("1"), 4), 4);
        assert_eq!(ledger.set_quantity(&id("1"), 0), 0);
        assert!(ledger.is_empty());
        assert_eq!(ledger.set_quantity(&id("2"), -1), 0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_removal_preserves_selection_order() {
        let mut ledger = CartLedger::new();
        ledger.increment(&id("3"));
        ledger.increment(&id("1"));
        ledger.increment(&id("2"));
        ledger.decrement(&id("1"));

        let order: Vec<_> = ledger.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["3", "2"]);
    }

    #[test]
    fn test_to_line_items_resolves_in_selection_order() {
        let mut ledger = CartLedger::new();
        ledger.increment(&id("2"));
        ledger.increment(&id("1"));
        ledger.increment(&id("2"));

        let lines = ledger.to_line_items(&store(&["1", "2", "3"])).unwrap();
        let summary: Vec<_> = lines.iter().map(|l| (l.id().as_str(), l.quantity)).collect();
        assert_eq!(summary, vec![("2", 2), ("1", 1)]);
    }

    #[test]
    fn test_to_line_items_fails_on_unknown_product() {
        let mut ledger = CartLedger::new();
        ledger.increment(&id("1"));
        ledger.increment(&id("9"));

        let err = ledger.to_line_items(&store(&["1"])).unwrap_err();
        assert_eq!(
            err,
            CartError::ProductNotFound {
                product_id: id("9"),
                store_id: StoreId::new("1"),
            }
        );
    }

    #[test]
    fn test_clear() {
        let mut ledger = CartLedger::new();
        ledger.increment(&id("1"));
        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(ledger.total_item_count(), 0);
    }
}
