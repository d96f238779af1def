//! Last Bite Core - Shared types library.
//!
//! This crate provides common types used across all Last Bite components:
//! - `storefront` - Catalog, cart, and checkout logic
//! - `cli` - Text driver for browsing the catalog and quoting carts
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no clocks,
//! no logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and delivery methods

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
