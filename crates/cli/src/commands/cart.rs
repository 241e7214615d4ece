//! Cart commands against the file-backed store.

#![allow(clippy::print_stdout)]

use std::sync::Arc;

use floating_cart::{
    CartConfig, CartStore, CartSummary, CurrencyFormatter, Hydration, Navigator, PriceFormatter,
};
use floating_cart::storage::KeyValueStorage;
use floating_cart_core::{ItemId, NewCartItem};
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Navigator that only records the transition in the log.
struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate_to(&self, route: &str) {
        info!(route, "Navigating");
    }
}

/// Open and hydrate the store described by `config`.
async fn open_store(config: &CartConfig) -> CartStore {
    let storage = Arc::new(config.file_storage());
    info!(path = %storage.path_for(&config.storage_key).display(), "Using saved cart");

    let store = CartStore::with_key(storage, config.storage_key.clone());
    match store.hydrate().await {
        Hydration::Discarded(e) => warn!("Saved cart was unreadable and has been ignored: {e}"),
        Hydration::Unavailable(e) => warn!("Saved cart could not be read: {e}"),
        report => info!(restored = report.is_restored(), "Cart loaded"),
    }
    store
}

fn summary_for(config: &CartConfig, store: &CartStore) -> CartSummary {
    let formatter: Arc<dyn CurrencyFormatter> = Arc::new(PriceFormatter::new(config.currency));
    CartSummary::new(store, formatter, Arc::new(LogNavigator))
}

fn print_badge(summary: &mut CartSummary) {
    println!("{}  {}", summary.label(), summary.total_price());
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the item is invalid or the cart cannot be saved.
pub async fn add(
    config: &CartConfig,
    id: &str,
    title: &str,
    image_url: &str,
    price: Decimal,
) -> Result<(), Box<dyn std::error::Error>> {
    let item = NewCartItem::new(id, title, image_url, price)?;
    let store = open_store(config).await;
    store.add_to_cart(item).await?;

    info!(id, "Added to cart");
    print_badge(&mut summary_for(config, &store));
    Ok(())
}

/// Add one unit to an existing line.
///
/// # Errors
///
/// Returns an error if the id is not in the cart or the cart cannot be saved.
pub async fn increment(config: &CartConfig, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id = ItemId::parse(id)?;
    let store = open_store(config).await;
    let quantity = store.increment(&id).await?;

    println!("{id}: {quantity}");
    print_badge(&mut summary_for(config, &store));
    Ok(())
}

/// Remove one unit from an existing line.
///
/// # Errors
///
/// Returns an error if the id is not in the cart or the cart cannot be saved.
pub async fn decrement(config: &CartConfig, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id = ItemId::parse(id)?;
    let store = open_store(config).await;
    let quantity = store.decrement(&id).await?;

    println!("{id}: {quantity}");
    print_badge(&mut summary_for(config, &store));
    Ok(())
}

/// Print the floating cart badge.
pub async fn show(config: &CartConfig) {
    let store = open_store(config).await;
    print_badge(&mut summary_for(config, &store));
}

/// Activate the floating cart and print the cart detail.
pub async fn open(config: &CartConfig) {
    let store = open_store(config).await;
    let mut summary = summary_for(config, &store);
    summary.on_activate();

    let formatter = PriceFormatter::new(config.currency);
    for line in store.items() {
        println!(
            "{:<12} {:<30} {:>4} x {:>10} = {:>10}",
            line.id(),
            line.title(),
            line.quantity(),
            formatter.format(line.price()),
            formatter.format(line.line_total()),
        );
    }
    print_badge(&mut summary);
}

/// Delete the saved cart slot.
///
/// # Errors
///
/// Returns an error if the slot cannot be removed.
pub async fn reset(config: &CartConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = config.file_storage();
    storage.remove(&config.storage_key).await?;
    info!(key = %config.storage_key, "Saved cart deleted");
    Ok(())
}
