//! Cart lines and the per-checkout cart snapshot.

use lastbite_core::{ProductId, StoreId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::Product;

/// Cart integrity and flow errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    /// A selection refers to a product the active store does not carry.
    ///
    /// Ledger and catalog are expected to agree, so this indicates a bug
    /// rather than user error.
    #[error("product {product_id} not found in store {store_id}")]
    ProductNotFound {
        product_id: ProductId,
        store_id: StoreId,
    },

    /// A cart was requested before any store was chosen.
    #[error("no store selected")]
    NoStoreSelected,

    /// The requested store does not exist in the catalog.
    #[error("store {0} not found")]
    StoreNotFound(StoreId),

    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,
}

/// A product snapshot together with the selected quantity.
///
/// `quantity` is always at least 1; a line that would drop to zero is
/// removed instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Create a line for `quantity` units of `product`.
    #[must_use]
    pub const fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// The product's ID.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Current price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }

    /// Original price minus current price, times quantity. Can be negative.
    #[must_use]
    pub fn line_savings(&self) -> Decimal {
        self.product.unit_savings() * Decimal::from(self.quantity)
    }
}

/// Cart contents handed from the store page to the cart screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub store_id: StoreId,
    pub store_name: String,
    lines: Vec<CartLine>,
}

impl Cart {
    /// Build a cart, discarding any zero-quantity lines.
    #[must_use]
    pub fn new(store_id: StoreId, store_name: impl Into<String>, lines: Vec<CartLine>) -> Self {
        Self {
            store_id,
            store_name: store_name.into(),
            lines: lines.into_iter().filter(|l| l.quantity > 0).collect(),
        }
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Consume the cart, returning its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Quantity of a product, or 0 if it is not in the cart.
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> u32 {
        self.line(id).map_or(0, |l| l.quantity)
    }

    fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id() == id)
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.id() == id)
    }

    /// Add one unit of a product already in the cart.
    ///
    /// The cart only holds products chosen on the store page, so there is
    /// no catalog entry to build a new line from.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] if the product has no line.
    pub fn increment(&mut self, id: &ProductId) -> Result<u32, CartError> {
        let store_id = self.store_id.clone();
        let line = self
            .lines
            .iter_mut()
            .find(|l| &l.product.id == id)
            .ok_or_else(|| CartError::ProductNotFound {
                product_id: id.clone(),
                store_id,
            })?;
        line.quantity = line.quantity.saturating_add(1);
        tracing::debug!(product_id = %id, quantity = line.quantity, "Cart line incremented");
        Ok(line.quantity)
    }

    /// Remove one unit; a line at quantity 1 is removed. Absent IDs are ignored.
    ///
    /// Returns the remaining quantity (0 once the line is gone).
    pub fn decrement(&mut self, id: &ProductId) -> u32 {
        let Some(index) = self.position(id) else {
            return 0;
        };
        let remaining = self.lines.get(index).map_or(0, |l| l.quantity.saturating_sub(1));
        self.set_at(index, remaining);
        tracing::debug!(product_id = %id, quantity = remaining, "Cart line decremented");
        remaining
    }

    /// Set an absolute quantity. Zero or negative removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] when a positive quantity is
    /// requested for a product that has no line.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<u32, CartError> {
        let Some(index) = self.position(id) else {
            if quantity <= 0 {
                return Ok(0);
            }
            return Err(CartError::ProductNotFound {
                product_id: id.clone(),
                store_id: self.store_id.clone(),
            });
        };
        let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        self.set_at(index, quantity);
        tracing::debug!(product_id = %id, quantity, "Cart line quantity set");
        Ok(quantity)
    }

    fn set_at(&mut self, index: usize, quantity: u32) {
        if quantity == 0 {
            self.lines.remove(index);
        } else if let Some(line) = self.lines.get_mut(index) {
            line.quantity = quantity;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, Utc};
    use rust_decimal_macros::dec;

    use super::*;

    fn line(id: &str, price: Decimal, original_price: Decimal, quantity: u32) -> CartLine {
        CartLine::new(
            Product {
                id: ProductId::new(id),
                name: format!("Product {id}"),
                price,
                original_price,
                expiry_date: DateTime::<Utc>::UNIX_EPOCH,
                image: String::new(),
            },
            quantity,
        )
    }

    fn cart(lines: Vec<CartLine>) -> Cart {
        Cart::new(StoreId::new("1"), "甜點天堂", lines)
    }

    #[test]
    fn test_line_totals() {
        let l = line("1", dec!(60), dec!(90), 2);
        assert_eq!(l.line_total(), dec!(120));
        assert_eq!(l.line_savings(), dec!(60));
    }

    #[test]
    fn test_new_drops_zero_quantity_lines() {
        let c = cart(vec![line("1", dec!(60), dec!(90), 0), line("2", dec!(80), dec!(120), 1)]);
        assert_eq!(c.lines().len(), 1);
        assert_eq!(c.quantity(&ProductId::new("1")), 0);
        assert_eq!(c.item_count(), 1);
    }

    #[test]
    fn test_increment_existing_line() {
        let mut c = cart(vec![line("1", dec!(60), dec!(90), 1)]);
        assert_eq!(c.increment(&ProductId::new("1")).unwrap(), 2);
        assert_eq!(c.item_count(), 2);
    }

    #[test]
    fn test_increment_unknown_line_is_error() {
        let mut c = cart(vec![line("1", dec!(60), dec!(90), 1)]);
        let err = c.increment(&ProductId::new("9")).unwrap_err();
        assert_eq!(
            err,
            CartError::ProductNotFound {
                product_id: ProductId::new("9"),
                store_id: StoreId::new("1"),
            }
        );
    }

    #[test]
    fn test_decrement_to_removal_keeps_order() {
        let mut c = cart(vec![
            line("1", dec!(60), dec!(90), 1),
            line("2", dec!(80), dec!(120), 2),
            line("3", dec!(70), dec!(100), 1),
        ]);
        assert_eq!(c.decrement(&ProductId::new("1")), 0);
        assert_eq!(c.decrement(&ProductId::new("2")), 1);

        let ids: Vec<_> = c.lines().iter().map(|l| l.id().as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_decrement_absent_is_noop() {
        let mut c = cart(vec![line("1", dec!(60), dec!(90), 1)]);
        assert_eq!(c.decrement(&ProductId::new("9")), 0);
        assert_eq!(c.item_count(), 1);
    }

    #[test]
    fn test_set_quantity() {
        let mut c = cart(vec![line("1", dec!(60), dec!(90), 1), line("2", dec!(80), dec!(120), 1)]);
        assert_eq!(c.set_quantity(&ProductId::new("1"), 5).unwrap(), 5);
        assert_eq!(c.set_quantity(&ProductId::new("2"), 0).unwrap(), 0);
        assert_eq!(c.set_quantity(&ProductId::new("1"), -3).unwrap(), 0);
        assert!(c.is_empty());
    }

    #[test]
    fn test_set_quantity_on_absent_line() {
        let mut c = cart(vec![]);
        assert_eq!(c.set_quantity(&ProductId::new("1"), 0).unwrap(), 0);
        assert!(c.set_quantity(&ProductId::new("1"), 2).is_err());
    }

    #[test]
    fn test_cart_line_serializes_flat() {
        let json = serde_json::to_value(line("1", dec!(60), dec!(90), 2)).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["quantity"], 2);
        assert!(json.get("originalPrice").is_some());
        assert!(json.get("product").is_none());
    }
}
