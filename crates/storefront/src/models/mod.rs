//! Domain models for the storefront.
//!
//! - [`catalog`] - Stores and their discounted products
//! - [`cart`] - Cart lines and the cart handed to checkout

pub mod cart;
pub mod catalog;

pub use cart::{Cart, CartError, CartLine};
pub use catalog::{Catalog, CatalogError, Product, Store};
