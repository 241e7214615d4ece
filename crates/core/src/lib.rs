//! Floating Cart Core - Shared cart types.
//!
//! This crate provides the types used by every Floating Cart component:
//! - `floating-cart` - Persistent cart store and floating cart summary
//! - `cli` - Command-line tool for inspecting and editing a persisted cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure cart arithmetic - no I/O, no
//! storage, no async runtime. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for item ids, quantities, prices and lines
//! - [`cart`] - The ordered cart, its mutations, totals and snapshot codec

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, QuantityChange, SnapshotError};
pub use types::*;
