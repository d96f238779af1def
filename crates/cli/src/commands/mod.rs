//! Command implementations.
//!
//! Commands write to any `io::Write` so they can be exercised in tests.

pub mod catalog;
pub mod quote;

use lastbite_storefront::models::Catalog;
use lastbite_storefront::{AppError, StorefrontConfig};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Storefront operation failed.
    #[error(transparent)]
    App(#[from] AppError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Whether the failure points at inconsistent catalog or cart state
    /// rather than bad input.
    #[must_use]
    pub const fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::App(app) if app.is_integrity_violation())
    }
}

/// Route storefront error types through [`AppError`].
macro_rules! from_storefront_error {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for CliError {
                fn from(err: $ty) -> Self {
                    Self::App(err.into())
                }
            }
        )+
    };
}

from_storefront_error!(
    lastbite_storefront::config::ConfigError,
    lastbite_storefront::models::CatalogError,
    lastbite_storefront::models::CartError,
    lastbite_storefront::screens::CheckoutError,
);

/// Load the configured catalog, or the built-in sample when none is set.
///
/// # Errors
///
/// Returns an error if the configured catalog file cannot be loaded.
pub fn load_catalog(config: &StorefrontConfig) -> Result<Catalog, CliError> {
    match &config.catalog_path {
        Some(path) => Ok(Catalog::load(path)?),
        None => {
            tracing::debug!("No catalog path configured, using sample catalog");
            Ok(Catalog::sample(chrono::Utc::now()))
        }
    }
}
