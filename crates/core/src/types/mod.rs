//! Core types for Last Bite.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod delivery;
pub mod id;
pub mod price;

pub use delivery::{DeliveryMethod, DeliveryMethodError};
pub use id::*;
pub use price::{CurrencyCode, CurrencyCodeError, Price};
