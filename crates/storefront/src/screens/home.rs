//! Store browsing and product selection.

use lastbite_core::{ProductId, StoreId};

use crate::models::{Cart, CartError, Catalog, Product, Store};
use crate::services::CartLedger;

/// State of the home screen for one shopper.
///
/// Selections are scoped to one store. Choosing a different store starts
/// over with an empty ledger.
#[derive(Debug, Clone)]
pub struct BrowseScreen<'a> {
    catalog: &'a Catalog,
    selected: Option<&'a Store>,
    ledger: CartLedger,
    search_query: String,
}

impl<'a> BrowseScreen<'a> {
    /// Start browsing `catalog` with nothing selected.
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            selected: None,
            ledger: CartLedger::new(),
            search_query: String::new(),
        }
    }

    /// All stores in the catalog.
    #[must_use]
    pub fn stores(&self) -> &'a [Store] {
        self.catalog.stores()
    }

    /// The currently selected store, if any.
    #[must_use]
    pub const fn selected_store(&self) -> Option<&'a Store> {
        self.selected
    }

    /// Select a store.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::StoreNotFound`] if the catalog has no such store.
    pub fn select_store(&mut self, id: &StoreId) -> Result<&'a Store, CartError> {
        let store = self
            .catalog
            .store(id)
            .ok_or_else(|| CartError::StoreNotFound(id.clone()))?;

        if self.selected.is_some_and(|current| current.id != store.id) && !self.ledger.is_empty() {
            tracing::debug!(
                from = ?self.selected.map(|s| &s.id),
                to = %store.id,
                dropped_items = self.ledger.total_item_count(),
                "Store changed, clearing selections"
            );
            self.ledger.clear();
        }
        self.selected = Some(store);
        Ok(store)
    }

    /// Set the product search text.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Products of the selected store matching the search text.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&'a Product> {
        self.selected
            .map(|store| store.search(&self.search_query).collect())
            .unwrap_or_default()
    }

    fn selected_product(&self, id: &ProductId) -> Result<&'a Product, CartError> {
        let store = self.selected.ok_or(CartError::NoStoreSelected)?;
        store.product(id).ok_or_else(|| CartError::ProductNotFound {
            product_id: id.clone(),
            store_id: store.id.clone(),
        })
    }

    /// Add one unit of a product from the selected store.
    ///
    /// # Errors
    ///
    /// Returns an error if no store is selected or the store does not carry
    /// the product.
    pub fn add(&mut self, id: &ProductId) -> Result<u32, CartError> {
        self.selected_product(id)?;
        Ok(self.ledger.increment(id))
    }

    /// Remove one unit. Products not in the ledger are ignored.
    pub fn remove(&mut self, id: &ProductId) -> u32 {
        self.ledger.decrement(id)
    }

    /// Set an absolute quantity; zero or negative removes the product.
    ///
    /// # Errors
    ///
    /// Returns an error when a positive quantity is requested and no store
    /// is selected or the store does not carry the product.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<u32, CartError> {
        if quantity > 0 {
            self.selected_product(id)?;
        }
        Ok(self.ledger.set_quantity(id, quantity))
    }

    /// Quantity currently selected for a product.
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> u32 {
        self.ledger.quantity(id)
    }

    /// Total units selected, for the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.ledger.total_item_count()
    }

    /// Read-only view of the ledger.
    #[must_use]
    pub const fn ledger(&self) -> &CartLedger {
        &self.ledger
    }

    /// Snapshot the selections into a cart for the cart screen.
    ///
    /// An empty selection produces an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NoStoreSelected`] if no store is selected, or
    /// [`CartError::ProductNotFound`] if a selection no longer resolves.
    pub fn open_cart(&self) -> Result<Cart, CartError> {
        let store = self.selected.ok_or(CartError::NoStoreSelected)?;
        let lines = self.ledger.to_line_items(store)?;
        tracing::debug!(
            store_id = %store.id,
            lines = lines.len(),
            items = self.ledger.total_item_count(),
            "Opening cart"
        );
        Ok(Cart::new(store.id.clone(), store.name.clone(), lines))
    }
}
