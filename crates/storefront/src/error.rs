//! Unified error handling.
//!
//! Provides a unified `AppError` type wrapping every storefront error so
//! drivers can propagate with `?` and report in one place.

use thiserror::Error;

use crate::config::ConfigError;
use crate::models::{CartError, CatalogError};
use crate::screens::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog could not be loaded or failed validation.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout could not be completed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

impl AppError {
    /// Whether this error means catalog and cart state disagree.
    ///
    /// These are bugs, not user mistakes. Drivers report them at error level
    /// and everything else at warn level.
    #[must_use]
    pub const fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::Cart(CartError::ProductNotFound { .. }))
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use lastbite_core::{DeliveryMethodError, ProductId, StoreId};

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(CartError::EmptyCart);
        assert_eq!(err.to_string(), "Cart error: cart is empty");
    }

    #[test]
    fn test_delivery_method_error_arrives_through_checkout() {
        let err = AppError::from(CheckoutError::from(DeliveryMethodError("drone".to_string())));
        assert!(matches!(err, AppError::Checkout(CheckoutError::InvalidDeliveryMethod(_))));
        assert!(err.to_string().contains("drone"));
    }

    #[test]
    fn test_integrity_violation_classification() {
        let missing = AppError::from(CartError::ProductNotFound {
            product_id: ProductId::new("9"),
            store_id: StoreId::new("1"),
        });
        assert!(missing.is_integrity_violation());
        assert!(!AppError::from(CartError::NoStoreSelected).is_integrity_violation());
        assert!(!AppError::from(CheckoutError::MissingAddress).is_integrity_violation());
    }
}
