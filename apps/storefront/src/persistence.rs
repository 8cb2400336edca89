//! # Persistence
//!
//! The storefront saves five collections to a key-value store, one JSON
//! document per key.
//!
//! ## Startup Load
//! ```text
//! for each of products, cart, orders, wishlist, banners:
//!     store.get(key)
//!       ├── Some(valid JSON)  ──► use it
//!       ├── Some(garbage)     ──► warn!, use the seed value
//!       ├── None              ──► use the seed value
//!       └── Err(DbError)      ──► startup fails
//! ```
//!
//! Seed values: the catalog, sample order and summer banner from
//! `lumina_core::seed`; an empty cart and an empty wishlist.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use lumina_core::cart::Cart;
use lumina_core::catalog::Catalog;
use lumina_core::marketing::BannerBoard;
use lumina_core::order::OrderLedger;
use lumina_core::state::{AppState, Collection};
use lumina_core::wishlist::Wishlist;
use lumina_core::CartItem;
use lumina_db::{Database, DbError, DbResult};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Where the storefront's collections live.
pub trait KeyValueStore: Send + Sync {
    /// Raw JSON stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = DbResult<Option<String>>> + Send;

    /// Replaces the value under `key`.
    fn put(&self, key: &str, value: String) -> impl Future<Output = DbResult<()>> + Send;
}

impl KeyValueStore for Database {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        self.collections().get_raw(key).await
    }

    async fn put(&self, key: &str, value: String) -> DbResult<()> {
        self.collections().put_raw(key, &value).await
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-process store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    reject_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        {
            let mut map = store.lock();
            for (key, value) in entries {
                map.insert(key.into(), value.into());
            }
        }
        store
    }

    /// Makes every subsequent `put` fail, to exercise write-failure paths.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Current value under `key`.
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.snapshot(key))
    }

    async fn put(&self, key: &str, value: String) -> DbResult<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(DbError::QueryFailed(format!("write to '{key}' rejected")));
        }
        self.lock().insert(key.to_string(), value);
        Ok(())
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Loads every collection, falling back to seed values.
pub async fn load_state<S: KeyValueStore>(store: &S) -> DbResult<AppState> {
    let seeded = AppState::seeded();

    let products = load_or(store, Collection::Products, || seeded.products.products().to_vec())
        .await?;
    let cart = load_or(store, Collection::Cart, Vec::<CartItem>::new).await?;
    let orders = load_or(store, Collection::Orders, || seeded.orders.orders().to_vec()).await?;
    let wishlist = load_or(store, Collection::Wishlist, Vec::<String>::new).await?;
    let banners = load_or(store, Collection::Banners, || {
        seeded.banners.banners().to_vec()
    })
    .await?;

    let state = AppState {
        products: Catalog::from_products(products),
        cart: Cart::from_items(cart),
        orders: OrderLedger::from_orders(orders),
        wishlist: Wishlist::from_ids(wishlist),
        banners: BannerBoard::from_banners(banners),
    };

    info!(
        products = state.products.len(),
        cart_lines = state.cart.item_count(),
        orders = state.orders.len(),
        wishlist = state.wishlist.len(),
        banners = state.banners.len(),
        "Storefront state loaded"
    );

    Ok(state)
}

async fn load_or<S, T, F>(store: &S, collection: Collection, seed: F) -> DbResult<T>
where
    S: KeyValueStore,
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.get(collection.key()).await? {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(error) => {
                warn!(%collection, %error, "Stored collection is unreadable, using seed value");
                Ok(seed())
            }
        },
        None => {
            debug!(%collection, "No stored collection, using seed value");
            Ok(seed())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_core::seed::seed_products;
    use lumina_db::DbConfig;

    #[tokio::test]
    async fn test_empty_store_loads_seed_state() {
        let state = load_state(&MemoryStore::new()).await.unwrap();
        assert_eq!(state, AppState::seeded());
    }

    #[tokio::test]
    async fn test_stored_collections_win() {
        let store = MemoryStore::with_entries([
            ("wishlist", r#"["2","2","5"]"#),
            ("banners", "[]"),
        ]);
        let state = load_state(&store).await.unwrap();

        assert_eq!(state.wishlist.ids(), ["2".to_string(), "5".to_string()]);
        assert!(state.banners.is_empty());
        assert_eq!(state.products.len(), 7);
    }

    #[tokio::test]
    async fn test_unreadable_collection_falls_back() {
        let store = MemoryStore::with_entries([("orders", r#"{"broken": true}"#)]);
        let state = load_state(&store).await.unwrap();
        assert_eq!(state.orders.orders()[0].id, "ORD-5501");
    }

    #[tokio::test]
    async fn test_rejected_write() {
        let store = MemoryStore::new();
        store.reject_writes(true);
        assert!(store.put("cart", "[]".to_string()).await.is_err());
        assert!(store.snapshot("cart").is_none());
    }

    #[tokio::test]
    async fn test_database_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let products = serde_json::to_string(&seed_products()[..2]).unwrap();
        db.put("products", products).await.unwrap();

        let state = load_state(&db).await.unwrap();
        assert_eq!(state.products.len(), 2);
        assert!(state.cart.is_empty());
    }
}
