//! Integration tests for Last Bite.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lastbite-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Browse, cart, and checkout screens end to end
//! - `order_pricing` - Subtotal, savings, and delivery fee rules
//! - `expiry_labels` - Expiry classification and badge text
//! - `cart_ledger_properties` - Property tests for quantity bookkeeping
//!
//! Everything runs against in-memory catalogs built with [`CatalogBuilder`].

use chrono::{DateTime, Duration, TimeZone, Utc};
use lastbite_core::{ProductId, StoreId};
use lastbite_storefront::models::{CartLine, Catalog, CatalogError, Product, Store};
use rust_decimal::Decimal;

/// Fixed clock for deterministic expiry labels.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Build a product expiring `hours_left` hours after [`fixed_now`].
#[must_use]
pub fn product(id: &str, name: &str, price: Decimal, original_price: Decimal, hours_left: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price,
        original_price,
        expiry_date: fixed_now() + Duration::hours(hours_left),
        image: format!("https://img.lastbite.test/{id}.jpg"),
    }
}

/// A single cart line for pricing tests.
#[must_use]
pub fn line(id: &str, price: Decimal, original_price: Decimal, quantity: u32) -> CartLine {
    CartLine::new(product(id, &format!("Item {id}"), price, original_price, 24), quantity)
}

/// Incrementally assemble a validated [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    stores: Vec<Store>,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new store; later [`Self::product`] calls add to it.
    #[must_use]
    pub fn store(mut self, id: &str, name: &str) -> Self {
        self.stores.push(Store {
            id: StoreId::new(id),
            name: name.to_string(),
            image: format!("https://img.lastbite.test/store-{id}.jpg"),
            products: Vec::new(),
        });
        self
    }

    /// Add a product to the most recently started store.
    ///
    /// Ignored if no store has been started.
    #[must_use]
    pub fn product(mut self, product: Product) -> Self {
        if let Some(store) = self.stores.last_mut() {
            store.products.push(product);
        }
        self
    }

    /// Validate and build the catalog.
    ///
    /// # Errors
    ///
    /// Returns the catalog validation error, if any.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        Catalog::new(self.stores)
    }
}
