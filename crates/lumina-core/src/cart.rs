//! # Cart
//!
//! The shopper's mutable cart: an ordered list of [`CartItem`]s keyed by
//! product id.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_to_cart(p)          existing line? quantity + 1 : append (qty 1)  │
//! │  remove_from_cart(id)    drop the line (absent id: no-op)              │
//! │  update_quantity(id, δ)  quantity = max(1, quantity + δ)               │
//! │  clear()                 only ever called by order placement           │
//! │                                                                         │
//! │  • A product appears at most once                                       │
//! │  • Every quantity stays ≥ 1, decrementing never removes a line         │
//! │  • Stock is NOT checked                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CartItem, Product};

/// The shopper's cart.
///
/// Serializes as a bare array of items, the persisted `cart` collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from persisted lines.
    ///
    /// Lines are taken as stored except that a quantity of 0 is raised to 1
    /// and repeated product ids are merged into the first line.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Cart::new();
        for item in items {
            let quantity = item.quantity.max(1);
            match cart.line_mut(item.product_id()) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
                None => cart.items.push(CartItem {
                    product: item.product,
                    quantity,
                }),
            }
        }
        cart
    }

    /// Adds one unit of `product`.
    ///
    /// The cart keeps a copy of the product as it is right now.
    pub fn add_to_cart(&mut self, product: &Product) {
        match self.line_mut(&product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.items.push(CartItem::new(product.clone())),
        }
    }

    /// Removes the line for `product_id`. Returns whether anything was removed.
    pub fn remove_from_cart(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id() != product_id);
        self.items.len() != before
    }

    /// Shifts a line's quantity by `delta`, never below 1.
    ///
    /// Returns whether the line exists. A decrement on a quantity-1 line is
    /// accepted and leaves the line at 1.
    pub fn update_quantity(&mut self, product_id: &str, delta: i64) -> bool {
        match self.line_mut(product_id) {
            Some(line) => {
                let next = (line.quantity as i64).saturating_add(delta).max(1);
                line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
                true
            }
            None => false,
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Units across all lines (the badge on the cart icon).
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// `Σ price × quantity`.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Deep copy of the lines, used to freeze an order.
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id() == product_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
