//! Floating cart summary: the badge showing item count and total price.
//!
//! The summary only reads cart state. It follows the store through a watch
//! channel and recomputes its two aggregates once per committed revision.

use std::sync::Arc;

use floating_cart_core::{CurrencyCode, Price};
use rust_decimal::Decimal;
use tokio::sync::watch;

use crate::store::{CartState, CartStore};

/// Route of the cart detail screen.
pub const CART_ROUTE: &str = "Cart";

/// Formats a money amount for display.
pub trait CurrencyFormatter: Send + Sync {
    /// Render `amount` as display text, symbol included.
    fn format(&self, amount: Decimal) -> String;
}

/// Moves the client to another screen.
pub trait Navigator: Send + Sync {
    /// Show the screen registered under `route`.
    fn navigate_to(&self, route: &str);
}

/// [`CurrencyFormatter`] rendering [`Price::display`] in a fixed currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceFormatter {
    currency: CurrencyCode,
}

impl PriceFormatter {
    /// Formatter for amounts in `currency`.
    #[must_use]
    pub const fn new(currency: CurrencyCode) -> Self {
        Self { currency }
    }
}

impl CurrencyFormatter for PriceFormatter {
    fn format(&self, amount: Decimal) -> String {
        Price::new(amount, self.currency).display()
    }
}

#[derive(Debug, Clone)]
struct Totals {
    revision: u64,
    item_count: u64,
    total_price: String,
}

impl Totals {
    fn compute(state: &CartState, formatter: &dyn CurrencyFormatter) -> Self {
        Self {
            revision: state.revision,
            item_count: state.cart.total_quantity(),
            total_price: formatter.format(state.cart.total_price()),
        }
    }
}

/// Read-only view over a [`CartStore`].
pub struct CartSummary {
    state: watch::Receiver<CartState>,
    formatter: Arc<dyn CurrencyFormatter>,
    navigator: Arc<dyn Navigator>,
    cached: Option<Totals>,
}

impl std::fmt::Debug for CartSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSummary")
            .field("cached", &self.cached)
            .finish_non_exhaustive()
    }
}

impl CartSummary {
    /// Subscribe to `store`.
    #[must_use]
    pub fn new(
        store: &CartStore,
        formatter: Arc<dyn CurrencyFormatter>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            state: store.subscribe(),
            formatter,
            navigator,
            cached: None,
        }
    }

    fn totals(&mut self) -> &Totals {
        let state = self.state.borrow_and_update();
        let fresh = match self.cached.take() {
            Some(totals) if totals.revision == state.revision => totals,
            _ => Totals::compute(&state, self.formatter.as_ref()),
        };
        drop(state);
        self.cached.insert(fresh)
    }

    /// Sum of `price * quantity`, formatted. An empty cart formats zero.
    pub fn total_price(&mut self) -> String {
        self.totals().total_price.clone()
    }

    /// Sum of quantities; 0 for an empty cart.
    pub fn total_item_count(&mut self) -> u64 {
        self.totals().item_count
    }

    /// Badge text for the cart button, e.g. `"3 itens"`.
    pub fn label(&mut self) -> String {
        format!("{} itens", self.total_item_count())
    }

    /// Open the cart detail screen.
    pub fn on_activate(&self) {
        tracing::debug!(route = CART_ROUTE, "Opening cart");
        self.navigator.navigate_to(CART_ROUTE);
    }

    /// Wait until the store commits a new state.
    ///
    /// Returns `false` once the store has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.state.changed().await.is_ok()
    }
}
