//! # Store
//!
//! The storefront's single copy of [`AppState`] and the only way to change it.
//!
//! ## Dispatch Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  dispatch(action)                                                       │
//! │     │                                                                   │
//! │     ├─ 1. write_gate.lock().await      one dispatch at a time           │
//! │     ├─ 2. state.lock()                 std mutex, never held over await │
//! │     │      ├─ AppState::apply(action)                                   │
//! │     │      └─ serialize all five collections (if anything changed) │
//! │     ├─ 3. drop state lock              readers continue                 │
//! │     └─ 4. persistence.put(key, json)   every collection, wholesale      │
//! │            └─ Err ──► error!, the in-memory change stands               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The gate keeps writes for consecutive dispatches in dispatch order, so the
//! stored value of a collection is always the newest one. Every mutation
//! rewrites all five keys, so a write that failed earlier is repaired by the
//! next successful dispatch.

use std::sync::{Mutex, MutexGuard, PoisonError};

use lumina_core::state::{Action, AppState, Collection};
use lumina_core::CoreResult;
use lumina_db::DbResult;
use tracing::{debug, error};

use crate::persistence::{load_state, KeyValueStore};

/// Application state plus the store it is saved to.
#[derive(Debug)]
pub struct Store<S> {
    state: Mutex<AppState>,
    write_gate: tokio::sync::Mutex<()>,
    persistence: S,
}

impl<S: KeyValueStore> Store<S> {
    /// Loads the saved collections (or their seeds) from `persistence`.
    pub async fn open(persistence: S) -> DbResult<Self> {
        let state = load_state(&persistence).await?;
        Ok(Self::from_state(persistence, state))
    }

    /// Wraps an already-built state. Nothing is written until the first
    /// dispatch.
    pub fn from_state(persistence: S, state: AppState) -> Self {
        Self {
            state: Mutex::new(state),
            write_gate: tokio::sync::Mutex::new(()),
            persistence,
        }
    }

    pub fn persistence(&self) -> &S {
        &self.persistence
    }

    /// Executes a function with read access to the state.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = store.with_state(|state| state.cart.item_count());
    /// ```
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        let state = self.lock();
        f(&state)
    }

    /// Applies `action` and, if anything changed, persists every collection.
    ///
    /// Returns the changed collections; empty when the action was a no-op
    /// (unknown id). Errors come only from the reducer, and leave the state
    /// untouched.
    pub async fn dispatch(&self, action: Action) -> CoreResult<Vec<Collection>> {
        let (changed, ()) = self.commit(|_| Ok(action), |_| ()).await?;
        Ok(changed)
    }

    /// Builds the action from the current state and reads the outcome, both
    /// under the same lock as the apply.
    ///
    /// Used where the action depends on the state (a fresh order id must not
    /// collide with the ledger) or where the caller needs the result before
    /// another dispatch can interleave.
    pub async fn dispatch_with<P, O, R>(&self, plan: P, observe: O) -> CoreResult<R>
    where
        P: FnOnce(&AppState) -> CoreResult<Action>,
        O: FnOnce(&AppState) -> R,
    {
        let (_, output) = self.commit(plan, observe).await?;
        Ok(output)
    }

    async fn commit<P, O, R>(&self, plan: P, observe: O) -> CoreResult<(Vec<Collection>, R)>
    where
        P: FnOnce(&AppState) -> CoreResult<Action>,
        O: FnOnce(&AppState) -> R,
    {
        let _gate = self.write_gate.lock().await;

        let (name, changed, writes, output) = {
            let mut state = self.lock();
            let action = plan(&state)?;
            let name = action.name();
            let changed = state.apply(action)?;
            let writes = if changed.is_empty() {
                Vec::new()
            } else {
                serialize_all(&state)
            };
            (name, changed, writes, observe(&state))
        };

        debug!(action = name, changed = ?changed, "Action applied");

        for (collection, value) in writes {
            if let Err(e) = self.persistence.put(collection.key(), value).await {
                error!(%collection, error = %e, "Failed to persist collection");
            }
        }

        Ok((changed, output))
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn serialize_all(state: &AppState) -> Vec<(Collection, String)> {
    Collection::ALL
        .into_iter()
        .filter_map(|collection| match state.collection_json(collection) {
            Ok(value) => Some((collection, value.to_string())),
            Err(e) => {
                error!(%collection, error = %e, "Failed to serialize collection");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use lumina_core::order::{CustomerInfo, TransitionPolicy};
    use lumina_core::{CoreError, OrderStatus};

    async fn open_memory() -> Store<MemoryStore> {
        Store::open(MemoryStore::new()).await.unwrap()
    }

    fn add(product_id: &str) -> Action {
        Action::AddToCart {
            product_id: product_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_persists_every_collection() {
        let store = open_memory().await;

        let changed = store.dispatch(add("1")).await.unwrap();

        assert_eq!(changed, vec![Collection::Cart]);
        let saved = store.persistence().snapshot("cart").unwrap();
        assert!(saved.contains("Horizon Smart Watch V2"));
        for collection in Collection::ALL {
            assert!(
                store.persistence().snapshot(collection.key()).is_some(),
                "{collection} not written"
            );
        }
        assert!(store.persistence().snapshot("orders").unwrap().contains("ORD-5501"));
    }

    #[tokio::test]
    async fn test_noop_writes_nothing() {
        let store = open_memory().await;

        let changed = store
            .dispatch(Action::RemoveFromCart {
                product_id: "missing".to_string(),
            })
            .await
            .unwrap();

        assert!(changed.is_empty());
        assert!(store.persistence().snapshot("cart").is_none());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_memory_change() {
        let store = open_memory().await;
        store.persistence().reject_writes(true);

        store.dispatch(add("2")).await.unwrap();

        assert_eq!(store.with_state(|s| s.cart.item_count()), 1);
        assert!(store.persistence().snapshot("cart").is_none());
    }

    #[tokio::test]
    async fn test_next_dispatch_repairs_failed_write() {
        let store = open_memory().await;
        store.persistence().reject_writes(true);
        store.dispatch(add("1")).await.unwrap();
        store.persistence().reject_writes(false);

        store
            .dispatch(Action::ToggleWishlist {
                product_id: "2".to_string(),
            })
            .await
            .unwrap();

        let cart = store.persistence().snapshot("cart").unwrap();
        assert!(cart.contains("Horizon Smart Watch V2"));
        assert!(store.persistence().snapshot("wishlist").unwrap().contains("\"2\""));
    }

    #[tokio::test]
    async fn test_reducer_error_leaves_state() {
        let store = open_memory().await;
        let before = store.with_state(Clone::clone);

        let result = store
            .dispatch(Action::UpdateOrderStatus {
                order_id: "ORD-5501".to_string(),
                status: OrderStatus::Pending,
                policy: TransitionPolicy::Strict,
            })
            .await;

        assert!(matches!(result, Err(CoreError::IllegalTransition { .. })));
        assert_eq!(store.with_state(Clone::clone), before);
    }

    #[tokio::test]
    async fn test_dispatch_with_plans_and_observes() {
        let store = open_memory().await;
        store.dispatch(add("4")).await.unwrap();

        let placed = store
            .dispatch_with(
                |state| {
                    assert!(!state.cart.is_empty());
                    Ok(Action::PlaceOrder {
                        customer: CustomerInfo {
                            name: "Dana".to_string(),
                            email: "dana@example.com".to_string(),
                        },
                        discount_percentage: 0,
                        order_id: "ORD-10000".to_string(),
                        date: chrono::NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
                    })
                },
                |state| state.orders.orders()[0].clone(),
            )
            .await
            .unwrap();

        assert_eq!(placed.id, "ORD-10000");
        assert!(store.with_state(|s| s.cart.is_empty()));
    }

    #[tokio::test]
    async fn test_plan_error_skips_apply() {
        let store = open_memory().await;

        let result = store
            .dispatch_with(|_| Err(CoreError::EmptyCart), |_| ())
            .await;

        assert!(matches!(result, Err(CoreError::EmptyCart)));
        assert_eq!(store.with_state(Clone::clone), AppState::seeded());
    }

    #[tokio::test]
    async fn test_reopen_sees_mutations() {
        let store = open_memory().await;
        store.dispatch(add("3")).await.unwrap();
        store
            .dispatch(Action::ToggleWishlist {
                product_id: "5".to_string(),
            })
            .await
            .unwrap();

        let saved: Vec<(String, String)> = ["cart", "wishlist"]
            .into_iter()
            .filter_map(|k| Some((k.to_string(), store.persistence().snapshot(k)?)))
            .collect();
        let reopened = Store::open(MemoryStore::with_entries(saved)).await.unwrap();

        reopened.with_state(|s| {
            assert_eq!(s.cart.items()[0].product.id, "3");
            assert!(s.wishlist.contains("5"));
            assert_eq!(s.products.len(), 7);
        });
    }
}
