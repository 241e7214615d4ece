//! Line quantity that can never drop below one.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// Zero is not a valid line quantity.
    #[error("quantity must be at least 1")]
    Zero,
}

/// Number of units of one product in the cart.
///
/// ## Constraints
///
/// - Minimum 1; a line never holds zero units
/// - Incrementing saturates at `u32::MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity from a raw count.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Zero`] for a count of zero.
    pub fn new(count: u32) -> Result<Self, QuantityError> {
        NonZeroU32::new(count).map(Self).ok_or(QuantityError::Zero)
    }

    /// Returns the raw count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// One more unit.
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One fewer unit, or `None` when already at the floor of one.
    #[must_use]
    pub fn decremented(self) -> Option<Self> {
        NonZeroU32::new(self.0.get() - 1).map(Self)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
