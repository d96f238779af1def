//! Display filters used when rendering products and orders as text.

use chrono::{DateTime, Utc};
use lastbite_core::{CurrencyCode, Price};
use rust_decimal::Decimal;

use crate::models::Product;
use crate::services::ExpiryStatus;

/// Format an amount with its currency symbol and two decimal places.
#[must_use]
pub fn format_price(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).display()
}

/// Discount badge text, e.g. `"33% OFF"`. Empty when there is no original price.
#[must_use]
pub fn discount_label(product: &Product) -> String {
    product
        .discount_percent()
        .map(|percent| format!("{percent}% OFF"))
        .unwrap_or_default()
}

/// Expiry text for a product as seen at `now`.
#[must_use]
pub fn expiry_label(product: &Product, now: DateTime<Utc>) -> String {
    ExpiryStatus::classify(product.expiry_date, now).to_string()
}
