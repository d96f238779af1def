//! Order totals and delivery-fee tiering.
//!
//! Everything here is a pure function of its inputs. Nothing is cached,
//! so callers recompute after every quantity or delivery-method change.
//! Amounts are summed at full precision and rounded only for display.

use lastbite_core::{CurrencyCode, DeliveryMethod, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::CartLine;

/// Default subtotal at or above which delivery is free.
pub const DEFAULT_FREE_DELIVERY_THRESHOLD: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// Default flat delivery fee below the threshold.
pub const DEFAULT_DELIVERY_FEE: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Delivery fee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPricing {
    /// Subtotals at or above this amount ship free.
    pub free_delivery_threshold: Decimal,
    /// Fee charged for delivery below the threshold.
    pub flat_fee: Decimal,
}

impl Default for DeliveryPricing {
    fn default() -> Self {
        Self {
            free_delivery_threshold: DEFAULT_FREE_DELIVERY_THRESHOLD,
            flat_fee: DEFAULT_DELIVERY_FEE,
        }
    }
}

impl DeliveryPricing {
    /// Create a fee schedule.
    #[must_use]
    pub const fn new(free_delivery_threshold: Decimal, flat_fee: Decimal) -> Self {
        Self {
            free_delivery_threshold,
            flat_fee,
        }
    }

    /// Fee for `subtotal` under `method`.
    ///
    /// Self-pickup is always free. Delivery is free once the subtotal
    /// reaches the threshold (inclusive), otherwise the flat fee applies.
    #[must_use]
    pub fn delivery_fee(&self, subtotal: Decimal, method: DeliveryMethod) -> Decimal {
        match method {
            DeliveryMethod::SelfPickup => Decimal::ZERO,
            DeliveryMethod::Delivery if subtotal >= self.free_delivery_threshold => Decimal::ZERO,
            DeliveryMethod::Delivery => self.flat_fee,
        }
    }

    /// How much more must be added to reach free delivery, if anything.
    #[must_use]
    pub fn remaining_for_free_delivery(&self, subtotal: Decimal) -> Option<Decimal> {
        (subtotal < self.free_delivery_threshold).then(|| self.free_delivery_threshold - subtotal)
    }
}

/// Sum of current price times quantity. Never uses the original price.
#[must_use]
pub fn subtotal(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}

/// Sum of `(original_price - price) * quantity`.
///
/// Not clamped: a product priced above its original price contributes a
/// negative amount, which shows up in the total.
#[must_use]
pub fn total_savings(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_savings).sum()
}

/// Subtotal plus delivery fee.
#[must_use]
pub fn grand_total(subtotal: Decimal, delivery_fee: Decimal) -> Decimal {
    subtotal + delivery_fee
}

/// A priced order, derived from cart lines and a delivery method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub method: DeliveryMethod,
    pub subtotal: Decimal,
    pub savings: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub currency_code: CurrencyCode,
}

impl OrderSummary {
    /// Price `lines` for `method` under `pricing`.
    #[must_use]
    pub fn price(
        lines: &[CartLine],
        method: DeliveryMethod,
        pricing: &DeliveryPricing,
        currency_code: CurrencyCode,
    ) -> Self {
        let subtotal = subtotal(lines);
        let delivery_fee = pricing.delivery_fee(subtotal, method);
        Self {
            method,
            subtotal,
            savings: total_savings(lines),
            delivery_fee,
            total: grand_total(subtotal, delivery_fee),
            currency_code,
        }
    }

    /// Whether the summary should list a delivery-fee row.
    #[must_use]
    pub fn shows_delivery_fee(&self) -> bool {
        self.method == DeliveryMethod::Delivery && self.delivery_fee > Decimal::ZERO
    }

    #[must_use]
    pub const fn subtotal_price(&self) -> Price {
        Price::new(self.subtotal, self.currency_code)
    }

    #[must_use]
    pub const fn savings_price(&self) -> Price {
        Price::new(self.savings, self.currency_code)
    }

    #[must_use]
    pub const fn delivery_fee_price(&self) -> Price {
        Price::new(self.delivery_fee, self.currency_code)
    }

    #[must_use]
    pub const fn total_price(&self) -> Price {
        Price::new(self.total, self.currency_code)
    }
}
