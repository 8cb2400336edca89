//! # Shop Commands
//!
//! Browsing, the cart, the wishlist and the hero banners.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shopper Action            Command                  State Change        │
//! │  ──────────────            ───────                  ────────────        │
//! │  Pick a category ────────► list_products("Home…") ─► (read only)        │
//! │  Click "Add to Bag" ─────► add_to_cart(id) ───────► cart line +1        │
//! │  Press − / + ────────────► update_cart_quantity ──► qty, never below 1  │
//! │  Click remove ───────────► remove_from_cart(id) ──► line dropped        │
//! │  Click the heart ────────► toggle_wishlist(id) ───► id in / out         │
//! │  Open the bag ───────────► get_cart() ────────────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown product ids are never an error here: the cart is returned as it
//! was. Only [`get_product`] reports `NOT_FOUND`.

use lumina_core::pricing::{price_cart, PriceBreakdown};
use lumina_core::state::Action;
use lumina_core::{CartItem, DiscountCode, MarketingBanner, Product, ALL_CATEGORIES};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::commands::checkout::CheckoutSession;
use crate::error::{ApiError, ApiResult};
use crate::persistence::KeyValueStore;
use crate::store::Store;

/// The bag drawer: lines plus the order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub pricing: PriceBreakdown,
    pub promo: Option<DiscountCode>,
}

/// Products in `category`. `None` or `"All"` lists everything.
pub fn list_products<S: KeyValueStore>(store: &Store<S>, category: Option<&str>) -> Vec<Product> {
    let category = category.unwrap_or(ALL_CATEGORIES);
    debug!(category = %category, "list_products command");
    store.with_state(|s| s.products.by_category(category).into_iter().cloned().collect())
}

pub fn get_product<S: KeyValueStore>(store: &Store<S>, product_id: &str) -> ApiResult<Product> {
    debug!(product_id = %product_id, "get_product command");
    store
        .with_state(|s| s.products.get(product_id).cloned())
        .ok_or_else(|| ApiError::not_found("Product", product_id))
}

/// The category bar: `All` followed by every category in catalog order.
pub fn categories<S: KeyValueStore>(store: &Store<S>) -> Vec<String> {
    store.with_state(|s| {
        std::iter::once(ALL_CATEGORIES)
            .chain(s.products.categories())
            .map(str::to_string)
            .collect()
    })
}

pub fn deals_of_the_day<S: KeyValueStore>(store: &Store<S>) -> Vec<Product> {
    store.with_state(|s| s.products.deals_of_the_day().into_iter().cloned().collect())
}

// =============================================================================
// Cart
// =============================================================================

/// Current cart priced with the session's promo.
pub fn get_cart<S: KeyValueStore>(store: &Store<S>, session: &CheckoutSession) -> CartResponse {
    debug!("get_cart command");
    let promo = session.active_promo();
    let percentage = promo.as_ref().map_or(0, |code| code.percentage);

    store.with_state(|s| CartResponse {
        items: s.cart.snapshot(),
        pricing: price_cart(&s.cart, percentage),
        promo,
    })
}

/// Adds one unit of a product, or a new line at quantity 1.
pub async fn add_to_cart<S: KeyValueStore>(
    store: &Store<S>,
    session: &CheckoutSession,
    product_id: &str,
) -> ApiResult<CartResponse> {
    debug!(product_id = %product_id, "add_to_cart command");
    store
        .dispatch(Action::AddToCart {
            product_id: product_id.to_string(),
        })
        .await?;
    Ok(get_cart(store, session))
}

pub async fn remove_from_cart<S: KeyValueStore>(
    store: &Store<S>,
    session: &CheckoutSession,
    product_id: &str,
) -> ApiResult<CartResponse> {
    debug!(product_id = %product_id, "remove_from_cart command");
    store
        .dispatch(Action::RemoveFromCart {
            product_id: product_id.to_string(),
        })
        .await?;
    Ok(get_cart(store, session))
}

/// Changes a line's quantity by `delta`, clamped at 1.
pub async fn update_cart_quantity<S: KeyValueStore>(
    store: &Store<S>,
    session: &CheckoutSession,
    product_id: &str,
    delta: i64,
) -> ApiResult<CartResponse> {
    debug!(product_id = %product_id, delta, "update_cart_quantity command");
    store
        .dispatch(Action::UpdateQuantity {
            product_id: product_id.to_string(),
            delta,
        })
        .await?;
    Ok(get_cart(store, session))
}

// =============================================================================
// Wishlist & Banners
// =============================================================================

/// Flips wishlist membership. Returns whether the product is now saved.
pub async fn toggle_wishlist<S: KeyValueStore>(store: &Store<S>, product_id: &str) -> ApiResult<bool> {
    debug!(product_id = %product_id, "toggle_wishlist command");
    store
        .dispatch(Action::ToggleWishlist {
            product_id: product_id.to_string(),
        })
        .await?;
    Ok(store.with_state(|s| s.wishlist.contains(product_id)))
}

/// Saved products still in the catalog, in the order they were saved.
pub fn wishlist<S: KeyValueStore>(store: &Store<S>) -> Vec<Product> {
    store.with_state(|s| {
        s.wishlist
            .ids()
            .iter()
            .filter_map(|id| s.products.get(id).cloned())
            .collect()
    })
}

pub fn banners<S: KeyValueStore>(store: &Store<S>) -> Vec<MarketingBanner> {
    store.with_state(|s| s.banners.banners().to_vec())
}
