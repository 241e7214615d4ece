//! The cart: an ordered list of lines with unique ids.
//!
//! All operations here are pure; persistence and change notification live
//! in the `floating-cart` crate.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::types::item::survives_snapshot;
use crate::types::{CartItem, ItemId, NewCartItem, Quantity};

/// Errors decoding a persisted cart snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Not JSON, not an array, or a line failed to decode (including zero
    /// quantities and empty ids).
    #[error("invalid cart snapshot: {0}")]
    Json(#[from] serde_json::Error),
    /// A line carries a negative unit price.
    #[error("line {0} has a negative price")]
    NegativePrice(ItemId),
    /// A line's price would change when written back.
    #[error("line {0} has a price that cannot be stored exactly")]
    InexactPrice(ItemId),
    /// Two lines share an id.
    #[error("duplicate line id {0}")]
    DuplicateId(ItemId),
}

/// Result of a decrement request on an existing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The quantity changed to the contained value.
    Updated(Quantity),
    /// The line was already at the floor of one; nothing changed.
    AtFloor,
}

/// Cart contents in first-added order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Lines in first-added order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&CartItem> {
        self.items.iter().find(|line| line.id() == id)
    }

    fn get_mut(&mut self, id: &ItemId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|line| line.id() == id)
    }

    /// Add one unit of `item`.
    ///
    /// An existing line with the same id gains one unit in place; other
    /// fields keep their stored values. Otherwise a new line with quantity 1
    /// is appended.
    pub fn add(&mut self, item: NewCartItem) -> Quantity {
        if let Some(line) = self.get_mut(item.id()) {
            let quantity = line.quantity().incremented();
            line.set_quantity(quantity);
            return quantity;
        }
        self.items.push(item.into_line());
        Quantity::ONE
    }

    /// Add one unit to an existing line.
    ///
    /// Returns the new quantity, or `None` if no line has this id.
    pub fn increment(&mut self, id: &ItemId) -> Option<Quantity> {
        let line = self.get_mut(id)?;
        let quantity = line.quantity().incremented();
        line.set_quantity(quantity);
        Some(quantity)
    }

    /// Remove one unit from an existing line, never going below one.
    ///
    /// Returns `None` if no line has this id.
    pub fn decrement(&mut self, id: &ItemId) -> Option<QuantityChange> {
        let line = self.get_mut(id)?;
        Some(line.quantity().decremented().map_or(
            QuantityChange::AtFloor,
            |quantity| {
                line.set_quantity(quantity);
                QuantityChange::Updated(quantity)
            },
        ))
    }

    /// Sum of `price * quantity` over all lines, saturating at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity().get()))
            .sum()
    }

    /// Encode as the persisted JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if a price cannot be represented as a JSON number.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Decode and validate a persisted JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a JSON array of lines, or if
    /// any line has a zero quantity, a negative or over-precise price, or a
    /// repeated id.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let items: Vec<CartItem> = serde_json::from_str(raw)?;

        let mut seen = std::collections::HashSet::with_capacity(items.len());
        for line in &items {
            if line.price() < Decimal::ZERO {
                return Err(SnapshotError::NegativePrice(line.id().clone()));
            }
            if !survives_snapshot(line.price()) {
                return Err(SnapshotError::InexactPrice(line.id().clone()));
            }
            if !seen.insert(line.id()) {
                return Err(SnapshotError::DuplicateId(line.id().clone()));
            }
        }

        Ok(Self { items })
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn item(id: &str, cents: i64) -> NewCartItem {
        NewCartItem::new(id, format!("Product {id}"), "https://img", Decimal::new(cents, 2))
            .unwrap()
    }

    fn id(s: &str) -> ItemId {
        ItemId::parse(s).unwrap()
    }

    #[test]
    fn test_distinct_adds_append_with_quantity_one() {
        let mut cart = Cart::new();
        for name in ["a", "b", "c", "d"] {
            cart.add(item(name, 100));
        }
        assert_eq!(cart.len(), 4);
        assert!(cart.items().iter().all(|l| l.quantity() == Quantity::ONE));
        let order: Vec<_> = cart.items().iter().map(|l| l.id().as_str()).collect();
        assert_eq!(order, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_same_id_twice_merges() {
        let mut cart = Cart::new();
        cart.add(item("a", 100));
        cart.add(item("b", 100));
        let quantity = cart.add(item("a", 100));

        assert_eq!(cart.len(), 2);
        assert_eq!(quantity.get(), 2);
        assert_eq!(cart.items()[0].id().as_str(), "a");
        assert_eq!(cart.items()[0].quantity().get(), 2);
    }

    #[test]
    fn test_readd_keeps_stored_fields() {
        let mut cart = Cart::new();
        cart.add(item("a", 100));
        cart.add(NewCartItem::new("a", "Renamed", "other", Decimal::new(999, 2)).unwrap());

        let line = cart.get(&id("a")).unwrap();
        assert_eq!(line.title(), "Product a");
        assert_eq!(line.price(), Decimal::new(100, 2));
    }

    #[test]
    fn test_increment_then_decrement_restores() {
        let mut cart = Cart::new();
        cart.add(item("a", 100));
        cart.add(item("b", 250));
        cart.add(item("b", 250));
        let before = cart.clone();

        cart.increment(&id("b")).unwrap();
        cart.decrement(&id("b")).unwrap();

        assert_eq!(cart, before);
    }

    #[test]
    fn test_decrement_floor_is_one() {
        let mut cart = Cart::new();
        cart.add(item("a", 100));

        assert_eq!(cart.decrement(&id("a")), Some(QuantityChange::AtFloor));
        assert_eq!(cart.get(&id("a")).unwrap().quantity(), Quantity::ONE);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_unknown_id() {
        let mut cart = Cart::new();
        cart.add(item("a", 100));
        assert_eq!(cart.increment(&id("zzz")), None);
        assert_eq!(cart.decrement(&id("zzz")), None);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        assert_eq!(cart.total_price(), Decimal::ZERO);
        assert_eq!(cart.total_quantity(), 0);

        cart.add(item("a", 1000));
        cart.add(item("a", 1000));
        cart.add(item("b", 500));

        assert_eq!(cart.total_price(), Decimal::new(25, 0));
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut cart = Cart::new();
        cart.add(item("a", 999));
        cart.add(item("b", 1));
        cart.increment(&id("a"));

        let decoded = Cart::from_json(&cart.to_json().unwrap()).unwrap();
        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_snapshot_round_trip_keeps_precise_prices() {
        let mut cart = Cart::new();
        for (n, price) in ["0.1", "19.999", "1234567.891", "0.000001", "99999999.99"]
            .into_iter()
            .enumerate()
        {
            let price: Decimal = price.parse().unwrap();
            cart.add(NewCartItem::new(&n.to_string(), "P", "", price).unwrap());
        }
        cart.increment(&id("2"));

        let decoded = Cart::from_json(&cart.to_json().unwrap()).unwrap();
        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_from_json_rejects_inexact_price() {
        assert!(matches!(
            Cart::from_json(
                r#"[{"id":"a","title":"X","image_url":"u","price":"1.234567890123456789","quantity":1}]"#
            ),
            Err(SnapshotError::InexactPrice(_))
        ));
    }

    #[test]
    fn test_total_price_saturates_instead_of_overflowing() {
        let raw = r#"[
            {"id":"a","title":"X","image_url":"u","price":10000000000000000000000,"quantity":5000000},
            {"id":"b","title":"Y","image_url":"v","price":10000000000000000000000,"quantity":5000000}
        ]"#;
        let cart = Cart::from_json(raw).unwrap();

        let line_total: Decimal = "50000000000000000000000000000".parse().unwrap();
        assert_eq!(cart.items()[0].line_total(), line_total);
        assert_eq!(cart.total_price(), Decimal::MAX);
    }

    #[test]
    fn test_from_json_scenario() {
        let cart =
            Cart::from_json(r#"[{"id":"a","title":"X","image_url":"u","price":2,"quantity":3}]"#)
                .unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity().get(), 3);
        assert_eq!(cart.total_price(), Decimal::new(6, 0));
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(
            Cart::from_json("{not json"),
            Err(SnapshotError::Json(_))
        ));
        assert!(matches!(
            Cart::from_json(r#"{"id":"a"}"#),
            Err(SnapshotError::Json(_))
        ));
        assert!(matches!(
            Cart::from_json(r#"[{"id":"a","title":"X","image_url":"u","price":2,"quantity":0}]"#),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_negative_price() {
        assert!(matches!(
            Cart::from_json(r#"[{"id":"a","title":"X","image_url":"u","price":-2,"quantity":1}]"#),
            Err(SnapshotError::NegativePrice(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let raw = r#"[
            {"id":"a","title":"X","image_url":"u","price":1,"quantity":1},
            {"id":"a","title":"Y","image_url":"v","price":1,"quantity":2}
        ]"#;
        assert!(matches!(
            Cart::from_json(raw),
            Err(SnapshotError::DuplicateId(dup)) if dup.as_str() == "a"
        ));
    }
}
