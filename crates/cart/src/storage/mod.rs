//! Durable key-value storage for cart snapshots.
//!
//! The cart store only needs a single mutable slot, but the contract is a
//! plain string-to-string map so any async key-value engine can back it:
//!
//! - [`MemoryStorage`] - process-local map, for tests and ephemeral carts
//! - [`FileStorage`] - one file per key inside a directory

mod file;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a [`KeyValueStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub(crate) fn io(key: &str, source: std::io::Error) -> Self {
        Self::Io {
            key: key.to_owned(),
            source,
        }
    }
}

/// Async string key-value store.
///
/// Semantics are last-writer-wins per key; there is no compare-and-swap.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
