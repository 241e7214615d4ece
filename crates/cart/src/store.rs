//! The cart store: authoritative cart state synchronised with a durable slot.
//!
//! # Consistency
//!
//! Every mutation runs under one async mutex for the whole
//! read-modify-persist-publish cycle, so two back-to-back increments always
//! yield +2. The new state is written to storage first; only when the write
//! succeeds is it published to readers. A failed write leaves the in-memory
//! cart untouched and returns [`CartError::Storage`].
//!
//! # Hydration
//!
//! The store is readable (empty) as soon as it is constructed. The snapshot
//! is loaded at most once, either by an explicit [`CartStore::hydrate`] or
//! implicitly by the first mutation, so an early write never overwrites a
//! cart saved by a previous run.

use std::sync::Arc;

use floating_cart_core::{
    Cart, CartItem, ItemId, NewCartItem, Quantity, QuantityChange, SnapshotError,
};
use tokio::sync::{Mutex, watch};
use tracing::instrument;

use crate::config::DEFAULT_STORAGE_KEY;
use crate::error::{CartError, Result};
use crate::storage::{KeyValueStorage, StorageError};

/// A committed cart state as seen by readers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    /// Bumped on every committed change; starts at 0 for the empty cart.
    pub revision: u64,
    /// Cart contents.
    pub cart: Cart,
}

/// Outcome of loading the persisted snapshot.
#[derive(Debug)]
pub enum Hydration {
    /// The snapshot was loaded; the cart now holds `items` lines.
    Restored { items: usize },
    /// No snapshot exists; the cart stays empty.
    Empty,
    /// The snapshot was unreadable and was ignored; the cart stays empty.
    Discarded(SnapshotError),
    /// Storage could not be read; the cart stays empty. The next mutation
    /// retries the read.
    Unavailable(StorageError),
    /// An earlier call (or mutation) already hydrated the store.
    AlreadyHydrated,
}

impl Hydration {
    /// Whether state from a previous run is now in memory.
    #[must_use]
    pub const fn is_restored(&self) -> bool {
        matches!(self, Self::Restored { .. })
    }
}

struct Writer {
    hydrated: bool,
}

/// Cart state container backed by a [`KeyValueStorage`] slot.
///
/// Share it with `Arc<CartStore>`; all methods take `&self`.
pub struct CartStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    writer: Mutex<Writer>,
    state: watch::Sender<CartState>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create an empty store persisting under [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Create an empty store persisting under `key`.
    #[must_use]
    pub fn with_key(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        let (state, _) = watch::channel(CartState::default());
        Self {
            storage,
            key: key.into(),
            writer: Mutex::new(Writer { hydrated: false }),
            state,
        }
    }

    /// Key of the durable slot.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current committed state.
    #[must_use]
    pub fn snapshot(&self) -> CartState {
        self.state.borrow().clone()
    }

    /// Current lines in first-added order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.state.borrow().cart.items().to_vec()
    }

    /// Receive every committed state, starting with the current one.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    /// Load the persisted snapshot, replacing the in-memory cart wholesale.
    ///
    /// Never fails: missing, corrupt or unreadable snapshots leave the cart
    /// empty and are reported through the returned [`Hydration`].
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn hydrate(&self) -> Hydration {
        let mut writer = self.writer.lock().await;
        if writer.hydrated {
            return Hydration::AlreadyHydrated;
        }
        self.load(&mut writer).await
    }

    async fn load(&self, writer: &mut Writer) -> Hydration {
        let raw = match self.storage.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                writer.hydrated = true;
                tracing::debug!("No saved cart");
                return Hydration::Empty;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read saved cart");
                return Hydration::Unavailable(e);
            }
        };

        writer.hydrated = true;
        match Cart::from_json(&raw) {
            Ok(cart) => {
                let items = cart.len();
                self.publish(cart);
                tracing::info!(items, "Restored saved cart");
                Hydration::Restored { items }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable saved cart");
                Hydration::Discarded(e)
            }
        }
    }

    /// Add one unit of `item`, appending a new line if its id is not in the
    /// cart yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be persisted; the in-memory
    /// cart is then unchanged.
    #[instrument(skip(self, item), fields(key = %self.key, id = %item.id()))]
    pub async fn add_to_cart(&self, item: NewCartItem) -> Result<()> {
        let quantity = self.mutate(|cart| Ok((cart.add(item), true))).await?;
        tracing::debug!(%quantity, "Added to cart");
        Ok(())
    }

    /// Add one unit to the line with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] for an unknown id, or an error if
    /// the cart could not be persisted.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn increment(&self, id: &ItemId) -> Result<Quantity> {
        self.mutate(|cart| {
            cart.increment(id)
                .map(|quantity| (quantity, true))
                .ok_or_else(|| CartError::ItemNotFound(id.clone()))
        })
        .await
    }

    /// Remove one unit from the line with `id`. A line at quantity 1 is left
    /// as is; nothing is written in that case.
    ///
    /// Returns the line's quantity after the call.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] for an unknown id, or an error if
    /// the cart could not be persisted.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn decrement(&self, id: &ItemId) -> Result<Quantity> {
        self.mutate(|cart| match cart.decrement(id) {
            Some(QuantityChange::Updated(quantity)) => Ok((quantity, true)),
            Some(QuantityChange::AtFloor) => {
                tracing::debug!("Quantity already at 1");
                Ok((Quantity::ONE, false))
            }
            None => Err(CartError::ItemNotFound(id.clone())),
        })
        .await
    }

    /// Run `op` on a copy of the current cart and commit the copy when `op`
    /// reports a change.
    async fn mutate<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Cart) -> Result<(T, bool)>,
    {
        let mut writer = self.writer.lock().await;
        if !writer.hydrated
            && let Hydration::Unavailable(e) = self.load(&mut writer).await
        {
            return Err(e.into());
        }

        let mut next = self.state.borrow().cart.clone();
        let (outcome, changed) = op(&mut next)?;
        if changed {
            self.persist(&next).await?;
            self.publish(next);
        }
        Ok(outcome)
    }

    async fn persist(&self, cart: &Cart) -> Result<()> {
        let json = cart.to_json()?;
        self.storage.set(&self.key, &json).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to save cart");
            CartError::from(e)
        })
    }

    fn publish(&self, cart: Cart) {
        self.state.send_modify(|state| {
            state.revision += 1;
            state.cart = cart;
        });
    }
}
