//! Error type for cart store operations.
//!
//! Hydration never fails outright (see [`crate::store::Hydration`]); every
//! mutation returns [`Result`] so callers learn when a change was not saved.

use floating_cart_core::{ItemId, SnapshotError};
use thiserror::Error;

use crate::storage::StorageError;

/// Cart store errors.
#[derive(Debug, Error)]
pub enum CartError {
    /// The durable slot could not be read or written. The in-memory cart
    /// was left unchanged.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be encoded for persistence.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// `increment`/`decrement` targeted an id that is not in the cart.
    #[error("Item not in cart: {0}")]
    ItemNotFound(ItemId),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::ItemNotFound(ItemId::parse("sku-9").unwrap());
        assert_eq!(err.to_string(), "Item not in cart: sku-9");

        let err = CartError::from(StorageError::Unavailable("disk full".to_string()));
        assert_eq!(err.to_string(), "Storage error: storage unavailable: disk full");
    }
}
