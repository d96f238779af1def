//! Cart review screen.

use lastbite_core::{CurrencyCode, Price, ProductId};
use rust_decimal::Decimal;

use crate::models::{Cart, CartError, CartLine};
use crate::screens::CheckoutScreen;
use crate::services::{DeliveryPricing, subtotal, total_savings};

/// State of the cart screen for one shopper.
#[derive(Debug, Clone)]
pub struct CartScreen {
    cart: Cart,
    currency: CurrencyCode,
}

impl CartScreen {
    #[must_use]
    pub const fn new(cart: Cart, currency: CurrencyCode) -> Self {
        Self { cart, currency }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn store_name(&self) -> &str {
        &self.cart.store_name
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Add one unit of a product already in the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] if the product has no line.
    pub fn increment(&mut self, id: &ProductId) -> Result<u32, CartError> {
        self.cart.increment(id)
    }

    /// Remove one unit; the line disappears at zero.
    pub fn decrement(&mut self, id: &ProductId) -> u32 {
        self.cart.decrement(id)
    }

    /// Set an absolute quantity; zero or negative removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] for a positive quantity on a
    /// product that has no line.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<u32, CartError> {
        self.cart.set_quantity(id, quantity)
    }

    /// Sum of current prices times quantities.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        subtotal(self.cart.lines())
    }

    /// Sum of per-line savings against original prices. Can be negative.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        total_savings(self.cart.lines())
    }

    #[must_use]
    pub fn subtotal_price(&self) -> Price {
        Price::new(self.subtotal(), self.currency)
    }

    #[must_use]
    pub fn savings_price(&self) -> Price {
        Price::new(self.savings(), self.currency)
    }

    /// Hand the current cart to the checkout screen.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] if there is nothing to check out.
    pub fn proceed_to_checkout(&self, pricing: DeliveryPricing) -> Result<CheckoutScreen, CartError> {
        if self.cart.is_empty() {
            return Err(CartError::EmptyCart);
        }
        Ok(CheckoutScreen::new(self.cart.clone(), pricing, self.currency))
    }
}
