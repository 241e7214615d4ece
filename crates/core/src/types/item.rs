//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ItemId, ItemIdError};
use super::quantity::Quantity;

/// Errors that can occur when building a [`NewCartItem`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// The id is not a valid [`ItemId`].
    #[error(transparent)]
    Id(#[from] ItemIdError),
    /// Unit prices cannot be negative.
    #[error("price must not be negative (got {0})")]
    NegativePrice(Decimal),
    /// The price has more precision than the persisted JSON number keeps.
    #[error("price {0} cannot be stored exactly")]
    InexactPrice(Decimal),
}

/// Whether `price` reads back unchanged after being written as a JSON number.
pub(crate) fn survives_snapshot(price: Decimal) -> bool {
    rust_decimal::serde::float::serialize(&price, serde_json::value::Serializer)
        .ok()
        .and_then(|value| <Decimal as Deserialize>::deserialize(value).ok())
        == Some(price)
}

/// A product about to be added to the cart (a [`CartItem`] without quantity).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    id: ItemId,
    title: String,
    image_url: String,
    price: Decimal,
}

impl NewCartItem {
    /// Build a new item.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is empty, or if `price` is negative or too
    /// precise to survive a save and reload.
    pub fn new(
        id: &str,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, ItemError> {
        if price < Decimal::ZERO {
            return Err(ItemError::NegativePrice(price));
        }
        if !survives_snapshot(price) {
            return Err(ItemError::InexactPrice(price));
        }
        Ok(Self {
            id: ItemId::parse(id)?,
            title: title.into(),
            image_url: image_url.into(),
            price,
        })
    }

    /// Product id.
    #[must_use]
    pub const fn id(&self) -> &ItemId {
        &self.id
    }

    /// Unit price.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    /// Turn into a cart line holding a single unit.
    #[must_use]
    pub fn into_line(self) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity: Quantity::ONE,
        }
    }
}

/// One line in the cart.
///
/// Serialises to the persisted snapshot format:
///
/// ```json
/// {"id":"1","title":"Item","image_url":"https://...","price":9.99,"quantity":2}
/// ```
///
/// `price` is written as a JSON number and read from either a number or a
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    id: ItemId,
    title: String,
    image_url: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    price: Decimal,
    quantity: Quantity,
}

impl CartItem {
    /// Product id.
    #[must_use]
    pub const fn id(&self) -> &ItemId {
        &self.id
    }

    /// Product title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Product image URL.
    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Unit price.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    /// Units of this product in the cart.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// `price * quantity`, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity.get()))
    }

    pub(crate) const fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }
}
