//! # Order Ledger
//!
//! Converts a cart into an immutable order and tracks each order's status.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          place_order                                    │
//! │                                                                         │
//! │  Cart (live) ──┬──► price_items(cart, pct) ──► total (frozen)           │
//! │                │                                                        │
//! │                └──► snapshot() ──────────────► items (deep copy)        │
//! │                                                                         │
//! │  Order { id, customer, items, total, pct, Pending, date }               │
//! │      │                                                                  │
//! │      ├──► ledger.insert(0, order)   newest first                        │
//! │      └──► cart.clear()                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger itself does not refuse an empty cart; the checkout command
//! does. Order numbers come from an [`OrderIdGenerator`] so the caller
//! decides between random and sequential numbering.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::pricing::{price_items, ShippingPolicy};
use crate::types::{Order, OrderStatus};

/// Prefix of every order id.
pub const ORDER_ID_PREFIX: &str = "ORD-";

/// Smallest five-digit order number.
pub const ORDER_NUMBER_MIN: u32 = 10_000;

/// Largest five-digit order number.
pub const ORDER_NUMBER_MAX: u32 = 99_999;

// =============================================================================
// Transition Policy
// =============================================================================

/// How status updates are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may be set on any order (admin override).
    #[default]
    Permissive,
    /// Only moves allowed by [`OrderStatus::can_transition_to`].
    Strict,
}

impl std::str::FromStr for TransitionPolicy {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(TransitionPolicy::Permissive),
            "strict" => Ok(TransitionPolicy::Strict),
            _ => Err(crate::error::ValidationError::NotAllowed {
                field: "transition_policy".to_string(),
                allowed: vec!["permissive".to_string(), "strict".to_string()],
            }),
        }
    }
}

// =============================================================================
// Customer Details
// =============================================================================

/// Who an order is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
}

// =============================================================================
// Ledger
// =============================================================================

/// All placed orders, newest first.
///
/// Serializes as a bare array, the persisted `orders` collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderLedger {
    orders: Vec<Order>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_orders(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Places an order for everything in `cart` and empties the cart.
    ///
    /// `order_id` must come from an [`OrderIdGenerator`] run against this
    /// ledger. `date` is the UTC calendar day of placement. Cannot fail.
    pub fn place_order(
        &mut self,
        cart: &mut Cart,
        customer: CustomerInfo,
        discount_percentage: u32,
        order_id: String,
        date: NaiveDate,
    ) -> &Order {
        let breakdown = price_items(cart.items(), discount_percentage, &ShippingPolicy::default());

        let order = Order {
            id: order_id,
            customer_name: customer.name,
            customer_email: customer.email,
            items: cart.snapshot(),
            total_cents: breakdown.total_cents,
            discount_applied: breakdown.discount_percentage,
            status: OrderStatus::Pending,
            tracking_number: None,
            date,
        };

        self.orders.insert(0, order);
        cart.clear();
        &self.orders[0]
    }

    /// Sets an order's status.
    ///
    /// ## Returns
    /// - `Ok(true)` the status was written
    /// - `Ok(false)` no order has that id (nothing happens)
    /// - `Err(IllegalTransition)` strict policy refused the move; the order
    ///   is untouched
    pub fn update_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
        policy: TransitionPolicy,
    ) -> CoreResult<bool> {
        let Some(order) = self.orders.iter_mut().find(|o| o.id == order_id) else {
            return Ok(false);
        };

        if policy == TransitionPolicy::Strict
            && order.status != status
            && !order.status.can_transition_to(status)
        {
            return Err(CoreError::IllegalTransition {
                order_id: order.id.clone(),
                from: order.status,
                to: status,
            });
        }

        order.status = status;
        Ok(true)
    }

    pub fn find(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    pub fn contains_id(&self, order_id: &str) -> bool {
        self.find(order_id).is_some()
    }

    /// Newest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

// =============================================================================
// Order Numbers
// =============================================================================

/// Formats an order number as an order id: `ORD-12345`.
pub fn format_order_id(number: u64) -> String {
    format!("{ORDER_ID_PREFIX}{number}")
}

/// Source of fresh order ids.
///
/// Implementations must never return an id already present in `ledger`.
pub trait OrderIdGenerator {
    fn next_id(&mut self, ledger: &OrderLedger) -> String;
}

/// Random five-digit order numbers, checked against the ledger.
///
/// ## Collision Handling
/// ```text
/// draw random n in [10000, 99999] ── free? ──► ORD-n
///        │ taken (up to MAX_DRAWS times)
///        ▼
/// scan 10000..=99999 for the first free number ── found? ──► ORD-n
///        │ all 90,000 taken
///        ▼
/// first free number from 100000 upwards (six digits)
/// ```
pub struct RandomOrderIds<R: Rng = StdRng> {
    rng: R,
}

impl RandomOrderIds<StdRng> {
    /// Seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic sequence, for tests and demos.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomOrderIds<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomOrderIds<R> {
    const MAX_DRAWS: usize = 32;

    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> OrderIdGenerator for RandomOrderIds<R> {
    fn next_id(&mut self, ledger: &OrderLedger) -> String {
        for _ in 0..Self::MAX_DRAWS {
            let number = self.rng.random_range(ORDER_NUMBER_MIN..=ORDER_NUMBER_MAX);
            let candidate = format_order_id(number.into());
            if !ledger.contains_id(&candidate) {
                return candidate;
            }
        }
        first_free_id(ledger, ORDER_NUMBER_MIN.into())
    }
}

/// Counts up from a starting number, skipping ids already in the ledger.
#[derive(Debug, Clone)]
pub struct SequentialOrderIds {
    next: u64,
}

impl SequentialOrderIds {
    pub fn starting_at(number: u32) -> Self {
        Self {
            next: number.into(),
        }
    }
}

impl Default for SequentialOrderIds {
    fn default() -> Self {
        Self::starting_at(ORDER_NUMBER_MIN)
    }
}

impl OrderIdGenerator for SequentialOrderIds {
    fn next_id(&mut self, ledger: &OrderLedger) -> String {
        let id = first_free_id(ledger, self.next);
        let used = id
            .trim_start_matches(ORDER_ID_PREFIX)
            .parse::<u64>()
            .unwrap_or(self.next);
        self.next = used + 1;
        id
    }
}

/// First id at or after `start` not present in the ledger.
///
/// Checks at most `ledger.len() + 1` numbers: that many distinct ids can't
/// all be taken.
fn first_free_id(ledger: &OrderLedger, start: u64) -> String {
    (start..)
        .take(ledger.len() + 1)
        .map(format_order_id)
        .find(|candidate| !ledger.contains_id(candidate))
        .unwrap_or_else(|| format_order_id(start + ledger.len() as u64))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_products;

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "Alex Johnson".to_string(),
            email: "alex@example.com".to_string(),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn filled_cart() -> Cart {
        let products = seed_products();
        let mut cart = Cart::new();
        cart.add_to_cart(&products[0]);
        cart.add_to_cart(&products[3]);
        cart.add_to_cart(&products[3]);
        cart
    }

    #[test]
    fn test_place_order_snapshots_and_clears() {
        let mut ledger = OrderLedger::new();
        let mut cart = filled_cart();
        let before = cart.snapshot();

        let order = ledger
            .place_order(&mut cart, customer(), 0, "ORD-12345".to_string(), day())
            .clone();

        assert_eq!(order.items, before);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.discount_applied, 0);
        assert_eq!(order.date, day());
        assert!(cart.is_empty());
        assert_eq!(ledger.orders()[0].id, "ORD-12345");
    }

    #[test]
    fn test_order_total_includes_shipping_and_discount() {
        let mut ledger = OrderLedger::new();
        let mut cart = filled_cart(); // 199.99 + 2 × 49.99 = 299.97

        let order = ledger.place_order(&mut cart, customer(), 10, "ORD-10001".to_string(), day());

        // 299.97 − 30.00 (29.997 rounds up) + 45.00
        assert_eq!(order.total_cents, 29997 - 3000 + 4500);
        assert_eq!(order.discount_applied, 10);
    }

    #[test]
    fn test_newest_order_first() {
        let mut ledger = OrderLedger::new();
        let mut ids = SequentialOrderIds::default();

        let mut cart = filled_cart();
        let first = ids.next_id(&ledger);
        ledger.place_order(&mut cart, customer(), 0, first.clone(), day());

        let mut cart = filled_cart();
        let second = ids.next_id(&ledger);
        ledger.place_order(&mut cart, customer(), 0, second.clone(), day());

        assert_ne!(first, second);
        assert_eq!(ledger.orders()[0].id, second);
        assert_eq!(ledger.orders()[1].id, first);
    }

    #[test]
    fn test_order_is_frozen_against_later_changes() {
        let mut ledger = OrderLedger::new();
        let mut cart = filled_cart();
        ledger.place_order(&mut cart, customer(), 0, "ORD-20000".to_string(), day());
        let frozen = ledger.orders()[0].clone();

        let mut products = seed_products();
        products[0].price_cents = 1;
        cart.add_to_cart(&products[0]);

        assert_eq!(ledger.orders()[0], frozen);
    }

    #[test]
    fn test_permissive_policy_allows_any_move() {
        let mut ledger = OrderLedger::new();
        let mut cart = filled_cart();
        ledger.place_order(&mut cart, customer(), 0, "ORD-30000".to_string(), day());

        let policy = TransitionPolicy::Permissive;
        assert!(ledger.update_status("ORD-30000", OrderStatus::Delivered, policy).unwrap());
        assert!(ledger.update_status("ORD-30000", OrderStatus::Pending, policy).unwrap());
        assert_eq!(ledger.orders()[0].status, OrderStatus::Pending);
    }

    #[test]
    fn test_strict_policy_rejects_illegal_moves() {
        let mut ledger = OrderLedger::new();
        let mut cart = filled_cart();
        ledger.place_order(&mut cart, customer(), 0, "ORD-30001".to_string(), day());
        let policy = TransitionPolicy::Strict;

        let err = ledger
            .update_status("ORD-30001", OrderStatus::Delivered, policy)
            .unwrap_err();
        assert!(matches!(err, CoreError::IllegalTransition { .. }));
        assert_eq!(ledger.orders()[0].status, OrderStatus::Pending);

        assert!(ledger.update_status("ORD-30001", OrderStatus::Shipped, policy).unwrap());
        assert!(ledger.update_status("ORD-30001", OrderStatus::Delivered, policy).unwrap());
        assert!(ledger
            .update_status("ORD-30001", OrderStatus::Pending, policy)
            .is_err());
    }

    #[test]
    fn test_unknown_order_is_no_op() {
        let mut ledger = OrderLedger::new();
        for policy in [TransitionPolicy::Permissive, TransitionPolicy::Strict] {
            assert!(!ledger.update_status("ORD-00000", OrderStatus::Shipped, policy).unwrap());
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_random_ids_match_format_and_avoid_collisions() {
        let mut ledger = OrderLedger::new();
        let mut ids = RandomOrderIds::seeded(7);

        for _ in 0..200 {
            let id = ids.next_id(&ledger);
            let number: u32 = id.strip_prefix("ORD-").unwrap().parse().unwrap();
            assert_eq!(id.len(), 9);
            assert!((ORDER_NUMBER_MIN..=ORDER_NUMBER_MAX).contains(&number));
            assert!(!ledger.contains_id(&id));

            let mut cart = filled_cart();
            ledger.place_order(&mut cart, customer(), 0, id, day());
        }
        assert_eq!(ledger.len(), 200);
    }

    #[test]
    fn test_scan_finds_first_free_number() {
        let mut ledger = OrderLedger::new();
        for id in ["ORD-10000", "ORD-10001", "ORD-10003"] {
            let mut cart = filled_cart();
            ledger.place_order(&mut cart, customer(), 0, id.to_string(), day());
        }

        assert_eq!(first_free_id(&ledger, ORDER_NUMBER_MIN.into()), "ORD-10002");
        assert_eq!(first_free_id(&ledger, 10_003), "ORD-10004");
    }

    #[test]
    fn test_scan_moves_past_u32_max() {
        let top = u64::from(u32::MAX);
        let mut ledger = OrderLedger::new();
        let mut cart = filled_cart();
        ledger.place_order(&mut cart, customer(), 0, format_order_id(top), day());

        assert_eq!(first_free_id(&ledger, top), "ORD-4294967296");

        let mut ids = SequentialOrderIds::starting_at(u32::MAX);
        assert_eq!(ids.next_id(&ledger), "ORD-4294967296");
        assert_eq!(ids.next_id(&ledger), "ORD-4294967297");
    }

    #[test]
    fn test_sequential_skips_existing() {
        let mut ledger = OrderLedger::new();
        let mut cart = filled_cart();
        ledger.place_order(&mut cart, customer(), 0, "ORD-10000".to_string(), day());

        let mut ids = SequentialOrderIds::default();
        assert_eq!(ids.next_id(&ledger), "ORD-10001");
        assert_eq!(ids.next_id(&ledger), "ORD-10002");
    }

    #[test]
    fn test_transition_policy_parse() {
        assert_eq!("Strict".parse::<TransitionPolicy>().unwrap(), TransitionPolicy::Strict);
        assert!("lenient".parse::<TransitionPolicy>().is_err());
    }
}
