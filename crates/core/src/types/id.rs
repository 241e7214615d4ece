//! Cart line identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`ItemId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemIdError {
    /// The input string is empty.
    #[error("item id cannot be empty")]
    Empty,
}

/// Identifier of a product line in the cart.
///
/// Ids are opaque strings chosen by the catalog; the only constraint is that
/// they are non-empty. Within one cart each id appears at most once.
///
/// ```
/// use floating_cart_core::ItemId;
///
/// assert!(ItemId::parse("sku-1").is_ok());
/// assert!(ItemId::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Parse an `ItemId` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ItemIdError::Empty`] if the input is empty.
    pub fn parse(s: &str) -> Result<Self, ItemIdError> {
        Self::try_from(s.to_owned())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemId {
    type Error = ItemIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.is_empty() {
            return Err(ItemIdError::Empty);
        }
        Ok(Self(s))
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = ItemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
