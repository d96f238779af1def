//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_FREE_DELIVERY_THRESHOLD` - Subtotal at which delivery becomes free (default: 200)
//! - `STOREFRONT_DELIVERY_FEE` - Flat delivery fee below the threshold (default: 30)
//! - `STOREFRONT_CURRENCY` - ISO 4217 currency code for display (default: TWD)
//! - `STOREFRONT_CATALOG_PATH` - JSON catalog file; the built-in sample is used when unset

use std::path::PathBuf;
use std::str::FromStr;

use lastbite_core::CurrencyCode;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::services::pricing::{
    DEFAULT_DELIVERY_FEE, DEFAULT_FREE_DELIVERY_THRESHOLD, DeliveryPricing,
};

const FREE_DELIVERY_THRESHOLD_VAR: &str = "STOREFRONT_FREE_DELIVERY_THRESHOLD";
const DELIVERY_FEE_VAR: &str = "STOREFRONT_DELIVERY_FEE";
const CURRENCY_VAR: &str = "STOREFRONT_CURRENCY";
const CATALOG_PATH_VAR: &str = "STOREFRONT_CATALOG_PATH";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Subtotal at or above which delivery is free
    pub free_delivery_threshold: Decimal,
    /// Flat delivery fee charged below the threshold
    pub delivery_fee: Decimal,
    /// Currency used when formatting amounts
    pub currency: CurrencyCode,
    /// Optional JSON catalog file
    pub catalog_path: Option<PathBuf>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            free_delivery_threshold: DEFAULT_FREE_DELIVERY_THRESHOLD,
            delivery_fee: DEFAULT_DELIVERY_FEE,
            currency: CurrencyCode::default(),
            catalog_path: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable cannot be parsed or an amount is negative.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable cannot be parsed or an amount is negative.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let free_delivery_threshold =
            get_amount_or_default(&lookup, FREE_DELIVERY_THRESHOLD_VAR, DEFAULT_FREE_DELIVERY_THRESHOLD)?;
        let delivery_fee = get_amount_or_default(&lookup, DELIVERY_FEE_VAR, DEFAULT_DELIVERY_FEE)?;
        let currency = get_optional_env(&lookup, CURRENCY_VAR)
            .map(|raw| {
                CurrencyCode::from_str(&raw)
                    .map_err(|e| ConfigError::InvalidEnvVar(CURRENCY_VAR.to_string(), e.to_string()))
            })
            .transpose()?
            .unwrap_or_default();
        let catalog_path = get_optional_env(&lookup, CATALOG_PATH_VAR).map(PathBuf::from);

        Ok(Self {
            free_delivery_threshold,
            delivery_fee,
            currency,
            catalog_path,
        })
    }

    /// Delivery fee schedule for the order calculator.
    #[must_use]
    pub const fn delivery_pricing(&self) -> DeliveryPricing {
        DeliveryPricing::new(self.free_delivery_threshold, self.delivery_fee)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Get a non-negative decimal amount with a default value.
fn get_amount_or_default<F>(lookup: &F, key: &str, default: Decimal) -> Result<Decimal, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = get_optional_env(lookup, key) else {
        return Ok(default);
    };
    let amount = Decimal::from_str(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if amount < Decimal::ZERO {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must not be negative (got {amount})"),
        ));
    }
    Ok(amount)
}
