//! # Pricing Engine
//!
//! Turns cart lines and a discount percentage into the four figures shown at
//! checkout and frozen into every order.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. subtotal = Σ price × quantity                                       │
//! │  2. discount = subtotal × pct / 100        (cents, half up)             │
//! │  3. shipping = subtotal > $500 ? $0 : $45  (strictly greater,           │
//! │                                             judged BEFORE discount)     │
//! │  4. total    = subtotal − discount + shipping                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Empty carts are not special-cased: subtotal 0, shipping $45, total $45.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;
use crate::types::CartItem;
use crate::{FLAT_SHIPPING_FEE_CENTS, FREE_SHIPPING_THRESHOLD_CENTS};

// =============================================================================
// Shipping Policy
// =============================================================================

/// Free shipping above a threshold, a flat fee otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_threshold_cents: i64,
    pub flat_fee_cents: i64,
}

impl ShippingPolicy {
    /// Shipping charged for a given pre-discount subtotal.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal.cents() > self.free_threshold_cents {
            Money::zero()
        } else {
            Money::from_cents(self.flat_fee_cents)
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold_cents: FREE_SHIPPING_THRESHOLD_CENTS,
            flat_fee_cents: FLAT_SHIPPING_FEE_CENTS,
        }
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// The figures shown in the order summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub subtotal_cents: i64,
    /// The percentage that produced `discount_cents`, 0 if no promo.
    pub discount_percentage: u32,
    pub discount_cents: i64,
    pub shipping_cents: i64,
    pub total_cents: i64,
}

impl PriceBreakdown {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    #[inline]
    pub fn shipping(&self) -> Money {
        Money::from_cents(self.shipping_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    pub fn has_free_shipping(&self) -> bool {
        self.shipping_cents == 0
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Prices a set of lines.
///
/// ## Example
/// ```rust
/// use lumina_core::pricing::{price_items, ShippingPolicy};
///
/// // Nothing in the cart still costs shipping.
/// let empty = price_items(&[], 0, &ShippingPolicy::default());
/// assert_eq!(empty.total().cents(), 4500);
/// ```
pub fn price_items(
    items: &[CartItem],
    discount_percentage: u32,
    policy: &ShippingPolicy,
) -> PriceBreakdown {
    let discount_percentage = discount_percentage.min(100);
    let subtotal: Money = items.iter().map(CartItem::line_total).sum();
    let discount = subtotal.percentage_of(discount_percentage);
    let shipping = policy.shipping_for(subtotal);
    let total = subtotal - discount + shipping;

    PriceBreakdown {
        subtotal_cents: subtotal.cents(),
        discount_percentage,
        discount_cents: discount.cents(),
        shipping_cents: shipping.cents(),
        total_cents: total.cents(),
    }
}

/// Prices a cart with the standard shipping policy.
pub fn price_cart(cart: &Cart, discount_percentage: u32) -> PriceBreakdown {
    price_items(cart.items(), discount_percentage, &ShippingPolicy::default())
}

// =============================================================================
// Unit Tests
// =============================================================================
