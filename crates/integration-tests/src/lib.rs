//! Integration tests for Floating Cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p floating-cart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `persistence` - Cart survives restarts through file-backed storage
//! - `summary` - Floating cart badge follows the store end to end
//!
//! Every test gets its own temporary storage directory from [`TestContext`];
//! "restarting" means building a fresh [`CartStore`] over the same directory.

use std::path::Path;
use std::sync::Arc;

use floating_cart::storage::{FileStorage, KeyValueStorage};
use floating_cart::{CartStore, DEFAULT_STORAGE_KEY};
use floating_cart_core::NewCartItem;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Temporary storage directory shared by the stores of one test.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create a fresh, empty storage directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Directory holding the cart files.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// File storage over this context's directory.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.dir.path())
    }

    /// A new, not yet hydrated store, as at process start.
    #[must_use]
    pub fn start(&self) -> CartStore {
        CartStore::new(Arc::new(self.storage()))
    }

    /// Write `raw` directly into the cart slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot cannot be written.
    #[allow(clippy::expect_used)]
    pub async fn seed(&self, raw: &str) {
        self.storage()
            .set(DEFAULT_STORAGE_KEY, raw)
            .await
            .expect("Failed to seed cart slot");
    }

    /// Raw contents of the cart slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot cannot be read.
    #[allow(clippy::expect_used)]
    pub async fn raw(&self) -> Option<String> {
        self.storage()
            .get(DEFAULT_STORAGE_KEY)
            .await
            .expect("Failed to read cart slot")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A catalog product priced in whole currency units.
///
/// # Panics
///
/// Panics if `id` is empty or `price` is negative.
#[must_use]
#[allow(clippy::expect_used)]
pub fn product(id: &str, title: &str, price: i64) -> NewCartItem {
    NewCartItem::new(id, title, format!("https://cdn.example/{id}.png"), Decimal::new(price, 0))
        .expect("valid test product")
}
