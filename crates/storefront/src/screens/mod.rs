//! Screen controllers for the browse, cart, and checkout flow.
//!
//! Each controller owns the state of one screen for one shopper. Moving to
//! the next screen hands a value over; nothing is shared between flows.
//!
//! - [`home`] - Store selection and product picking
//! - [`cart`] - Quantity adjustments before checkout
//! - [`checkout`] - Delivery method, address, and the priced order

pub mod cart;
pub mod checkout;
pub mod home;

pub use cart::CartScreen;
pub use checkout::{CheckoutError, CheckoutScreen};
pub use home::BrowseScreen;
