//! Last Bite Storefront library.
//!
//! Catalog, cart, and checkout logic for a storefront selling discounted
//! food near its expiry date. There is no I/O beyond optionally reading a
//! catalog file; every screen owns its own state and hands values forward.
//!
//! # Flow
//!
//! ```text
//! Catalog -> BrowseScreen (CartLedger) -> CartScreen (Cart) -> CheckoutScreen -> OrderSummary
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod screens;
pub mod services;
pub mod telemetry;

pub use config::StorefrontConfig;
pub use error::{AppError, Result};
