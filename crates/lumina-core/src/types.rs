//! # Domain Types
//!
//! Core domain types used throughout Lumina Luxe.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  Product (copy) │──►│  id ORD-nnnnn   │       │
//! │  │  price_cents    │   │  quantity ≥ 1   │   │  items (frozen) │       │
//! │  │  stock          │   └─────────────────┘   │  total_cents    │       │
//! │  └─────────────────┘                         │  status         │       │
//! │                                               └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DiscountCode   │   │  OrderStatus    │   │MarketingBanner  │       │
//! │  │  code, percent  │   │  Pending ...    │   │ title, cta, ... │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! All records serialize with camelCase field names, which is also the shape
//! stored in the key-value collections.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A shopper review attached to a product. Display data only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub comment: String,
    pub date: String,
}

/// A product in the catalog.
///
/// Products are created and deleted from the admin console but never edited
/// in place, so a copy taken into a cart or an order stays truthful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier within the catalog.
    pub id: String,

    pub name: String,

    pub description: String,

    /// Selling price in cents. Always positive.
    pub price_cents: i64,

    /// Strike-through "was" price in cents. Display only, never used in totals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price_cents: Option<i64>,

    pub category: String,

    /// Image URI (remote URL or `data:` URI).
    pub image: String,

    /// Units on hand. Informational: nothing decrements it.
    pub stock: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
}

impl Product {
    /// Returns the selling price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the original price, if the product is marked down.
    #[inline]
    pub fn original_price(&self) -> Option<Money> {
        self.original_price_cents.map(Money::from_cents)
    }

    /// How much cheaper the product is than its original price.
    pub fn savings(&self) -> Money {
        match self.original_price() {
            Some(original) if original > self.price() => original - self.price(),
            _ => Money::zero(),
        }
    }

    /// The "-43%" badge: `round((original - price) / original × 100)`.
    ///
    /// `None` when the product has no original price above its current one.
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price_cents.filter(|&o| o > self.price_cents)?;
        let saved = (original - self.price_cents) as i128;
        let pct = (saved * 100 * 2 + original as i128) / (original as i128 * 2);
        Some(pct as u32)
    }

    /// Width of the stock gauge: `min(100, stock / 50 × 100)` percent.
    pub fn stock_level_percent(&self) -> u32 {
        (self.stock.saturating_mul(2)).min(100)
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A product copied into the cart together with a quantity.
///
/// The product is a frozen copy: later catalog changes don't reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,

    /// Always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// Creates a line for one unit of `product`.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.product.price()
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price() * self.quantity
    }
}

// =============================================================================
// Discount Code
// =============================================================================

/// A promo code and the whole-percent discount it grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    pub code: String,
    /// 0 to 100.
    pub percentage: u32,
    pub description: String,
}

// =============================================================================
// Order Status
// =============================================================================

/// Where an order is in its lifecycle.
///
/// ## State Machine
/// ```text
///                 ┌──────────────┐
///                 │   Pending    │◄── every new order
///                 └──┬────────┬──┘
///                    │        │
///                    ▼        ▼
///           ┌─────────┐   ┌───────────┐
///           │ Shipped │──►│ Cancelled │ (terminal)
///           └────┬────┘   └───────────┘
///                ▼
///           ┌───────────┐
///           │ Delivered │ (terminal)
///           └───────────┘
///
///  Processing: declared, never targeted; moves like Pending.
/// ```
///
/// The table above is what [`OrderStatus::can_transition_to`] encodes. It is
/// enforced only under the strict transition policy; the admin console
/// default overwrites status freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Delivered and Cancelled orders go nowhere else.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    ///
    /// Setting the status an order already has is not a transition.
    pub const fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Shipped)
                | (Pending, Cancelled)
                | (Processing, Shipped)
                | (Processing, Cancelled)
                | (Shipped, Delivered)
                | (Shipped, Cancelled)
        )
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, so `shipped` from the command line works.
impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: OrderStatus::ALL.iter().map(|s| s.to_string()).collect(),
            })
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
///
/// Everything except `status` is fixed the moment the order is placed.
/// `items` is a deep copy of the cart, and `total_cents` is the price the
/// shopper saw at checkout, shipping included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// `ORD-` followed by the order number.
    pub id: String,

    pub customer_name: String,

    pub customer_email: String,

    pub items: Vec<CartItem>,

    pub total_cents: i64,

    /// Percentage of the promo code used at checkout, 0 if none.
    #[serde(default)]
    pub discount_applied: u32,

    pub status: OrderStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,

    /// Calendar day the order was placed (UTC), `YYYY-MM-DD`.
    #[ts(as = "String")]
    pub date: NaiveDate,
}

impl Order {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

// =============================================================================
// Marketing Banner
// =============================================================================

/// A hero banner on the storefront home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MarketingBanner {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    /// Call-to-action button label.
    pub cta: String,
    /// Gradient style token, e.g. `from-blue-700 to-indigo-900`.
    pub bg_gradient: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: i64, original: Option<i64>, stock: u32) -> Product {
        Product {
            id: "p".to_string(),
            name: "Test".to_string(),
            description: String::new(),
            price_cents: price,
            original_price_cents: original,
            category: "Electronics".to_string(),
            image: String::new(),
            stock,
            reviews: None,
        }
    }

    #[test]
    fn test_discount_percent_rounds() {
        // Horizon Smart Watch: 199.99 vs 349.00 → 42.7% → 43
        assert_eq!(product(19999, Some(34900), 1).discount_percent(), Some(43));
        // Nebula Pro: 249 vs 399 → 37.59% → 38
        assert_eq!(product(24900, Some(39900), 1).discount_percent(), Some(38));
        assert_eq!(product(1000, None, 1).discount_percent(), None);
        assert_eq!(product(1000, Some(900), 1).discount_percent(), None);
    }

    #[test]
    fn test_stock_level_percent_caps_at_100() {
        assert_eq!(product(1, None, 5).stock_level_percent(), 10);
        assert_eq!(product(1, None, 25).stock_level_percent(), 50);
        assert_eq!(product(1, None, 80).stock_level_percent(), 100);
    }

    #[test]
    fn test_order_status_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Shipped));
        for status in OrderStatus::ALL {
            assert!(!status.can_transition_to(OrderStatus::Processing));
        }
    }

    #[test]
    fn test_order_status_parse_and_serialize() {
        assert_eq!("shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert!("lost".parse::<OrderStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&OrderStatus::Delivered).unwrap(),
            "\"Delivered\""
        );
    }

    #[test]
    fn test_cart_item_flattens_product() {
        let item = CartItem {
            product: product(4999, None, 40),
            quantity: 2,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["priceCents"], 4999);
        assert_eq!(json["quantity"], 2);
        assert_eq!(item.line_total().cents(), 9998);
    }
}
