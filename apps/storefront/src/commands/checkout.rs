//! # Checkout Commands
//!
//! Promo codes and order placement.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply_promo_code("summer25") ──► session promo = SUMMER25 (25%)        │
//! │                                                                         │
//! │  place_order(form)                                                      │
//! │     ├─ validate name, email, address ──► VALIDATION_ERROR               │
//! │     ├─ cart empty? ───────────────────► EMPTY_CART                      │
//! │     ├─ next order id (checked against the ledger, under the lock)       │
//! │     ├─ dispatch PlaceOrder ──► ledger[0] = order, cart = []             │
//! │     └─ clear the session promo                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The promo is session state: it is never persisted and a restart drops it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use lumina_core::discount::{DiscountRegistry, PromoState};
use lumina_core::order::{CustomerInfo, OrderIdGenerator, OrderLedger, RandomOrderIds};
use lumina_core::state::Action;
use lumina_core::validation::{validate_checkout, CheckoutForm};
use lumina_core::{CoreError, DiscountCode, Order};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::persistence::KeyValueStore;
use crate::store::Store;

/// Per-shopper checkout state: the active promo and the order id source.
pub struct CheckoutSession {
    registry: DiscountRegistry,
    promo: Mutex<PromoState>,
    order_ids: Mutex<Box<dyn OrderIdGenerator + Send>>,
}

impl CheckoutSession {
    /// Built-in promo codes, random order numbers.
    pub fn new() -> Self {
        Self::with_parts(DiscountRegistry::builtin(), RandomOrderIds::new())
    }

    pub fn with_parts<G>(registry: DiscountRegistry, order_ids: G) -> Self
    where
        G: OrderIdGenerator + Send + 'static,
    {
        Self {
            registry,
            promo: Mutex::new(PromoState::new()),
            order_ids: Mutex::new(Box::new(order_ids)),
        }
    }

    /// The active promo, if any.
    pub fn active_promo(&self) -> Option<DiscountCode> {
        self.promo().active().cloned()
    }

    /// Percentage the cart is priced with right now.
    pub fn discount_percentage(&self) -> u32 {
        self.promo().percentage()
    }

    fn next_order_id(&self, ledger: &OrderLedger) -> String {
        self.order_ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_id(ledger)
    }

    fn promo(&self) -> MutexGuard<'_, PromoState> {
        self.promo.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies a promo code. Case and surrounding spaces are ignored.
///
/// An unknown code fails with `INVALID_PROMO_CODE` and keeps whatever promo
/// was active before.
pub fn apply_promo_code(session: &CheckoutSession, code: &str) -> ApiResult<DiscountCode> {
    debug!(code = %code, "apply_promo_code command");

    let mut promo = session.promo();
    let applied = promo.apply(&session.registry, code)?.clone();

    info!(code = %applied.code, percentage = applied.percentage, "Promo code applied");
    Ok(applied)
}

pub fn clear_promo_code(session: &CheckoutSession) {
    debug!("clear_promo_code command");
    session.promo().clear();
}

/// Turns the cart into an order.
///
/// ## Returns
/// The placed order, now first in the ledger. The cart is empty afterwards
/// and the session promo is cleared.
///
/// The promo is read and cleared under the store lock, together with the
/// cart it prices. A refused checkout leaves the promo active.
pub async fn place_order<S: KeyValueStore>(
    store: &Store<S>,
    session: &CheckoutSession,
    form: CheckoutForm,
) -> ApiResult<Order> {
    debug!(email = %form.email, "place_order command");

    validate_checkout(&form)?;

    let customer = CustomerInfo {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
    };

    let placed = store
        .dispatch_with(
            |state| {
                if state.cart.is_empty() {
                    return Err(CoreError::EmptyCart);
                }
                Ok(Action::PlaceOrder {
                    customer,
                    discount_percentage: session.discount_percentage(),
                    order_id: session.next_order_id(&state.orders),
                    date: Utc::now().date_naive(),
                })
            },
            |state| {
                session.promo().clear();
                state.orders.orders().first().cloned()
            },
        )
        .await?
        .ok_or_else(|| ApiError::internal("Order missing from ledger after placement"))?;

    info!(
        order_id = %placed.id,
        total = %placed.total(),
        discount = placed.discount_applied,
        items = placed.item_count(),
        "Order placed"
    );
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::persistence::MemoryStore;
    use lumina_core::order::SequentialOrderIds;
    use lumina_core::OrderStatus;

    fn session() -> CheckoutSession {
        CheckoutSession::with_parts(DiscountRegistry::builtin(), SequentialOrderIds::starting_at(10_000))
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: " Jamie Rivera ".to_string(),
            email: "jamie@example.com".to_string(),
            address: "12 Harbour Street".to_string(),
        }
    }

    async fn store_with_cart(product_ids: &[&str]) -> Store<MemoryStore> {
        let store = Store::open(MemoryStore::new()).await.unwrap();
        for id in product_ids {
            store
                .dispatch(Action::AddToCart {
                    product_id: id.to_string(),
                })
                .await
                .unwrap();
        }
        store
    }

    #[test]
    fn test_invalid_code_keeps_previous_promo() {
        let session = session();
        apply_promo_code(&session, "lumina10").unwrap();

        let err = apply_promo_code(&session, "SUMMER2").unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidPromoCode);
        assert_eq!(session.discount_percentage(), 10);
    }

    #[test]
    fn test_clear_promo() {
        let session = session();
        apply_promo_code(&session, " summer25 ").unwrap();
        assert_eq!(session.active_promo().unwrap().code, "SUMMER25");

        clear_promo_code(&session);
        assert_eq!(session.discount_percentage(), 0);
    }

    #[tokio::test]
    async fn test_place_order_empties_cart_and_records_order() {
        let store = store_with_cart(&["1", "1"]).await;
        let session = session();
        let cart_before = store.with_state(|s| s.cart.snapshot());

        let order = place_order(&store, &session, form()).await.unwrap();

        assert_eq!(order.id, "ORD-10000");
        assert_eq!(order.customer_name, "Jamie Rivera");
        assert_eq!(order.items, cart_before);
        assert_eq!(order.status, OrderStatus::Pending);
        // 2 x $199.99 + $45.00 shipping
        assert_eq!(order.total_cents, 44_498);
        store.with_state(|s| {
            assert!(s.cart.is_empty());
            assert_eq!(s.orders.orders()[0].id, "ORD-10000");
        });
        assert!(store.persistence().snapshot("orders").unwrap().contains("ORD-10000"));
    }

    #[tokio::test]
    async fn test_place_order_applies_and_clears_promo() {
        let store = store_with_cart(&["5"]).await;
        let session = session();
        apply_promo_code(&session, "SUMMER25").unwrap();

        let order = place_order(&store, &session, form()).await.unwrap();

        // $1,999.00 - 25% = $1,499.25, free shipping
        assert_eq!(order.discount_applied, 25);
        assert_eq!(order.total_cents, 149_925);
        assert!(session.active_promo().is_none());
    }

    #[tokio::test]
    async fn test_two_orders_get_distinct_ids() {
        let store = store_with_cart(&["2"]).await;
        let session = session();
        let first = place_order(&store, &session, form()).await.unwrap();

        store
            .dispatch(Action::AddToCart {
                product_id: "3".to_string(),
            })
            .await
            .unwrap();
        let second = place_order(&store, &session, form()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.with_state(|s| s.orders.len()), 3);
    }

    #[tokio::test]
    async fn test_empty_cart_is_refused_and_keeps_promo() {
        let store = store_with_cart(&[]).await;
        let session = session();
        apply_promo_code(&session, "ADOBE20").unwrap();

        let err = place_order(&store, &session, form()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert_eq!(store.with_state(|s| s.orders.len()), 1);
        assert_eq!(session.discount_percentage(), 20);
    }

    #[tokio::test]
    async fn test_invalid_form_is_refused() {
        let store = store_with_cart(&["4"]).await;
        let bad = CheckoutForm {
            address: "   ".to_string(),
            ..form()
        };

        let err = place_order(&store, &session(), bad).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(store.with_state(|s| s.cart.item_count()), 1);
    }
}
