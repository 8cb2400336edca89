//! # lumina-core: Pure Storefront Logic for Lumina Luxe
//!
//! Everything the store *decides* lives here: what a cart costs, which promo
//! codes exist, how a cart becomes an order, and how an order moves through
//! its lifecycle. Nothing in this crate touches the disk, the network or the
//! clock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Lumina Luxe Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              apps/storefront (commands + CLI)                    │   │
//! │  │   shop ─► checkout ─► admin ─► assistant                         │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │ Action                        │ prompts               │
//! │  ┌──────────────▼──────────────────────┐  ┌────▼──────────────────┐   │
//! │  │     ★ lumina-core (THIS CRATE) ★    │  │      lumina-ai        │   │
//! │  │                                      │  │  Gemini + fallbacks   │   │
//! │  │  cart ─► pricing ─► order ledger     │  └───────────────────────┘   │
//! │  │  catalog  marketing  wishlist        │                              │
//! │  │  customers  analytics  state         │                              │
//! │  │                                      │                              │
//! │  │  NO I/O • NO DATABASE • NO NETWORK   │                              │
//! │  └──────────────┬──────────────────────┘                              │
//! │                 │ changed collections                                   │
//! │  ┌──────────────▼──────────────────────────────────────────────────┐   │
//! │  │              lumina-db (SQLite key-value store)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer cent arithmetic
//! - [`types`] - Product, CartItem, Order, OrderStatus, banners
//! - [`cart`] - The shopper's mutable cart
//! - [`pricing`] - Subtotal, discount, shipping, total
//! - [`discount`] - Promo code registry and the active promo
//! - [`order`] - Order ledger, status transitions, order numbers
//! - [`catalog`] - Product list, browsing helpers, product drafts
//! - [`marketing`] - Hero banners
//! - [`wishlist`] - Saved product ids
//! - [`customers`] - Customer rollups derived from orders
//! - [`analytics`] - Dashboard figures
//! - [`state`] - The whole application state and its reducer
//! - [`seed`] - First-run data
//! - [`validation`] - Form checks
//!
//! ## Example Usage
//!
//! ```rust
//! use lumina_core::cart::Cart;
//! use lumina_core::discount::DiscountRegistry;
//! use lumina_core::pricing::price_cart;
//! use lumina_core::seed::seed_products;
//!
//! let products = seed_products();
//! let mut cart = Cart::new();
//! cart.add_to_cart(&products[0]); // Horizon Smart Watch V2, $199.99
//!
//! let summer = DiscountRegistry::builtin().lookup("summer25").unwrap().percentage;
//! let breakdown = price_cart(&cart, summer);
//!
//! assert_eq!(breakdown.shipping().cents(), 4500); // under the $500 threshold
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod customers;
pub mod discount;
pub mod error;
pub mod marketing;
pub mod money;
pub mod order;
pub mod pricing;
pub mod seed;
pub mod state;
pub mod types;
pub mod validation;
pub mod wishlist;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category sentinel meaning "no filter" in the storefront category bar.
pub const ALL_CATEGORIES: &str = "All";

/// Orders above this subtotal ship for free ($500.00).
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 50_000;

/// Flat shipping fee for orders at or below the threshold ($45.00).
pub const FLAT_SHIPPING_FEE_CENTS: i64 = 4_500;
