//! Integration tests for cart durability across restarts.
//!
//! Each test writes through one `CartStore`, drops it, and reads the result
//! back through a fresh store over the same directory.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use floating_cart::{CartError, Hydration};
use floating_cart_core::{Cart, ItemId};
use floating_cart_integration_tests::{TestContext, product};

fn id(s: &str) -> ItemId {
    ItemId::parse(s).unwrap()
}

// =============================================================================
// Restart Tests
// =============================================================================

#[tokio::test]
async fn test_cart_survives_restart() {
    let ctx = TestContext::new();
    {
        let store = ctx.start();
        assert!(matches!(store.hydrate().await, Hydration::Empty));
        store.add_to_cart(product("a", "Apple", 2)).await.unwrap();
        store.add_to_cart(product("b", "Banana", 1)).await.unwrap();
        store.increment(&id("a")).await.unwrap();
    }

    let store = ctx.start();
    assert!(matches!(store.hydrate().await, Hydration::Restored { items: 2 }));

    let items = store.items();
    let lines: Vec<_> = items
        .iter()
        .map(|l| (l.id().as_str(), l.quantity().get()))
        .collect();
    assert_eq!(lines, [("a", 2), ("b", 1)]);
}

#[tokio::test]
async fn test_snapshot_uses_persisted_json_shape() {
    let ctx = TestContext::new();
    let store = ctx.start();
    store.add_to_cart(product("1", "Item", 9)).await.unwrap();

    let raw = ctx.raw().await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "id": "1",
            "title": "Item",
            "image_url": "https://cdn.example/1.png",
            "price": 9.0,
            "quantity": 1
        }])
    );
    assert!(ctx.path().join("%40app%3Acart.json").exists());
}

#[tokio::test]
async fn test_decrement_floor_survives_restart() {
    let ctx = TestContext::new();
    {
        let store = ctx.start();
        store.add_to_cart(product("a", "Apple", 2)).await.unwrap();
        store.decrement(&id("a")).await.unwrap();
        store.decrement(&id("a")).await.unwrap();
    }

    let store = ctx.start();
    store.hydrate().await;
    assert_eq!(store.items().len(), 1);
    assert_eq!(store.items()[0].quantity().get(), 1);
}

// =============================================================================
// Hydration Edge Cases
// =============================================================================

#[tokio::test]
async fn test_hydrate_seeded_snapshot() {
    let ctx = TestContext::new();
    ctx.seed(r#"[{"id":"a","title":"X","image_url":"u","price":2,"quantity":3}]"#)
        .await;

    let store = ctx.start();
    assert!(store.hydrate().await.is_restored());

    let cart = store.snapshot().cart;
    assert_eq!(cart.total_quantity(), 3);
    assert_eq!(cart.total_price().to_string(), "6");
}

#[tokio::test]
async fn test_corrupt_snapshot_is_discarded_and_replaced() {
    let ctx = TestContext::new();
    ctx.seed("{not json").await;

    let store = ctx.start();
    assert!(matches!(store.hydrate().await, Hydration::Discarded(_)));
    assert!(store.items().is_empty());

    store.add_to_cart(product("a", "Apple", 2)).await.unwrap();
    let saved = Cart::from_json(&ctx.raw().await.unwrap()).unwrap();
    assert_eq!(saved.len(), 1);
}

#[tokio::test]
async fn test_early_mutation_does_not_clobber_saved_cart() {
    let ctx = TestContext::new();
    {
        let store = ctx.start();
        store.add_to_cart(product("a", "Apple", 2)).await.unwrap();
    }

    // No explicit hydrate: the first write must still merge with the saved cart.
    let store = ctx.start();
    store.add_to_cart(product("b", "Banana", 1)).await.unwrap();

    let saved = Cart::from_json(&ctx.raw().await.unwrap()).unwrap();
    assert_eq!(saved.len(), 2);
}

#[tokio::test]
async fn test_unknown_id_leaves_file_untouched() {
    let ctx = TestContext::new();
    let store = ctx.start();
    store.add_to_cart(product("a", "Apple", 2)).await.unwrap();
    let before = ctx.raw().await;

    assert!(matches!(
        store.increment(&id("nope")).await,
        Err(CartError::ItemNotFound(_))
    ));
    assert_eq!(ctx.raw().await, before);
}

#[tokio::test]
async fn test_unwritable_directory_surfaces_storage_error() {
    let ctx = TestContext::new();
    // A regular file where the storage directory should be.
    let blocker = ctx.path().join("blocked");
    std::fs::write(&blocker, b"").unwrap();

    let store = floating_cart::CartStore::new(std::sync::Arc::new(
        floating_cart::storage::FileStorage::new(&blocker),
    ));
    assert!(matches!(
        store.add_to_cart(product("a", "Apple", 2)).await,
        Err(CartError::Storage(_))
    ));
    assert!(store.items().is_empty());
}
