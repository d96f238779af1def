//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `ledger` - Per-store product selection counts
//! - `pricing` - Subtotal, savings, delivery fee, and grand total
//! - `expiry` - Expiry-time buckets and labels

pub mod expiry;
pub mod ledger;
pub mod pricing;

pub use expiry::{ExpiryStatus, format_expiry};
pub use ledger::CartLedger;
pub use pricing::{DeliveryPricing, OrderSummary, grand_total, subtotal, total_savings};
