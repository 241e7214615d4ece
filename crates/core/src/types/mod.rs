//! Core types for Floating Cart.
//!
//! This module provides type-safe wrappers for cart domain concepts.

pub mod id;
pub mod item;
pub mod price;
pub mod quantity;

pub use id::{ItemId, ItemIdError};
pub use item::{CartItem, ItemError, NewCartItem};
pub use price::{CurrencyCode, Price};
pub use quantity::{Quantity, QuantityError};
