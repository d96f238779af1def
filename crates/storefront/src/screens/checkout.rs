//! Checkout: delivery method, address, and the final price.
//!
//! The order summary is recomputed from the cart on every call to
//! [`CheckoutScreen::summary`], so a change to either the quantities or the
//! delivery method is always reflected in the fee and total.

use lastbite_core::{CurrencyCode, DeliveryMethod, DeliveryMethodError};
use thiserror::Error;

use crate::models::{Cart, CartLine};
use crate::services::{DeliveryPricing, OrderSummary};

/// Checkout validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The delivery method string is not one we support.
    #[error(transparent)]
    InvalidDeliveryMethod(#[from] DeliveryMethodError),

    /// Delivery was chosen but no address was given.
    #[error("a delivery address is required")]
    MissingAddress,

    /// There is nothing to order.
    #[error("cannot check out an empty cart")]
    EmptyCart,
}

/// State of the checkout screen for one shopper.
#[derive(Debug, Clone)]
pub struct CheckoutScreen {
    cart: Cart,
    method: DeliveryMethod,
    address: Option<String>,
    pricing: DeliveryPricing,
    currency: CurrencyCode,
}

impl CheckoutScreen {
    /// Start checkout for `cart`. Delivery is preselected.
    #[must_use]
    pub fn new(cart: Cart, pricing: DeliveryPricing, currency: CurrencyCode) -> Self {
        Self {
            cart,
            method: DeliveryMethod::default(),
            address: None,
            pricing,
            currency,
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Mutable access to the cart; the next summary reflects any change.
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    #[must_use]
    pub const fn method(&self) -> DeliveryMethod {
        self.method
    }

    pub fn set_method(&mut self, method: DeliveryMethod) {
        tracing::debug!(from = %self.method, to = %method, "Delivery method changed");
        self.method = method;
    }

    /// Set the delivery method from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidDeliveryMethod`] for anything other
    /// than `delivery` or `self-pickup`; the current method is kept.
    pub fn set_method_str(&mut self, raw: &str) -> Result<(), CheckoutError> {
        let method = raw.parse::<DeliveryMethod>().inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected delivery method");
        })?;
        self.set_method(method);
        Ok(())
    }

    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Set the delivery address. Blank input clears it.
    pub fn set_address(&mut self, address: impl Into<String>) {
        let address = address.into();
        let trimmed = address.trim();
        self.address = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// Price the current cart under the current delivery method.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::price(self.cart.lines(), self.method, &self.pricing, self.currency)
    }

    /// Validate and finalize the order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines, or
    /// [`CheckoutError::MissingAddress`] if delivery was chosen without an
    /// address.
    pub fn confirm(&self) -> Result<OrderSummary, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if self.method.requires_address() && self.address.is_none() {
            return Err(CheckoutError::MissingAddress);
        }

        let summary = self.summary();
        tracing::info!(
            store_id = %self.cart.store_id,
            method = %summary.method,
            subtotal = %summary.subtotal,
            delivery_fee = %summary.delivery_fee,
            total = %summary.total,
            "Processing checkout"
        );
        Ok(summary)
    }
}
