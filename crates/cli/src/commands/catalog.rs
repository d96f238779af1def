//! `catalog` command: list stores and products.

use std::io::Write;

use chrono::{DateTime, Utc};
use lastbite_core::{CurrencyCode, StoreId};
use lastbite_storefront::filters::{discount_label, expiry_label, format_price};
use lastbite_storefront::models::{CartError, Catalog, Store};

use super::CliError;

/// What to list and how to format it.
pub struct ListOptions<'a> {
    pub search: Option<&'a str>,
    pub store: Option<&'a str>,
    pub currency: CurrencyCode,
    pub now: DateTime<Utc>,
}

/// Write the catalog listing to `out`.
///
/// # Errors
///
/// Returns an error if the requested store does not exist or writing fails.
pub fn list(out: &mut impl Write, catalog: &Catalog, options: &ListOptions<'_>) -> Result<(), CliError> {
    let stores: Vec<&Store> = match options.store {
        Some(raw) => {
            let id = StoreId::new(raw);
            let store = catalog
                .store(&id)
                .ok_or(CartError::StoreNotFound(id))?;
            vec![store]
        }
        None => catalog.stores().iter().collect(),
    };

    for store in stores {
        writeln!(out, "[{}] {}", store.id, store.name)?;

        let mut shown = 0usize;
        for product in store.search(options.search.unwrap_or_default()) {
            shown += 1;
            writeln!(
                out,
                "  #{}  {}  {} (原價 {})  {}  {}",
                product.id,
                product.name,
                format_price(product.price, options.currency),
                format_price(product.original_price, options.currency),
                discount_label(product),
                expiry_label(product, options.now),
            )?;
        }
        if shown == 0 {
            writeln!(out, "  (沒有符合的商品)")?;
        }
    }

    Ok(())
}
