//! Floating Cart - persistent cart store and floating cart summary.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the cart, serialises every mutation and
//!   writes the full cart to a durable key-value slot before publishing it
//! - [`summary::CartSummary`] follows the store and derives the item count
//!   and formatted total shown on the floating cart button
//! - [`storage`] defines the key-value contract plus memory and file
//!   backends
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use floating_cart::storage::MemoryStorage;
//! use floating_cart::store::CartStore;
//! use floating_cart::summary::{CartSummary, Navigator, PriceFormatter};
//! use floating_cart_core::{CurrencyCode, NewCartItem};
//! use rust_decimal::Decimal;
//!
//! struct NoopNavigator;
//!
//! impl Navigator for NoopNavigator {
//!     fn navigate_to(&self, _route: &str) {}
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let store = CartStore::new(Arc::new(MemoryStorage::new()));
//! store.hydrate().await;
//!
//! let mut summary = CartSummary::new(
//!     &store,
//!     Arc::new(PriceFormatter::new(CurrencyCode::USD)),
//!     Arc::new(NoopNavigator),
//! );
//!
//! let shirt = NewCartItem::new("shirt", "Shirt", "https://img/shirt.png", Decimal::new(1999, 2))?;
//! store.add_to_cart(shirt.clone()).await?;
//! store.add_to_cart(shirt).await?;
//!
//! assert_eq!(summary.total_item_count(), 2);
//! assert_eq!(summary.total_price(), "$39.98");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # }).unwrap();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod storage;
pub mod store;
pub mod summary;

pub use config::{CartConfig, ConfigError, DEFAULT_STORAGE_KEY};
pub use error::{CartError, Result};
pub use store::{CartState, CartStore, Hydration};
pub use summary::{CART_ROUTE, CartSummary, CurrencyFormatter, Navigator, PriceFormatter};
