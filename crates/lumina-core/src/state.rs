//! # Application State
//!
//! The five persisted collections in one value, and the reducer that applies
//! every mutation the storefront can make.
//!
//! ## Dispatch Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command ──► Action ──► AppState::apply ──► Vec<Collection> changed     │
//! │                              │                        │                 │
//! │                         pure, in memory               ▼                 │
//! │                                               caller persists exactly   │
//! │                                               these collections         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything random or time-dependent (order ids, dates, product ids) is
//! decided by the caller and carried inside the [`Action`], so `apply` is
//! deterministic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::{CoreResult, ValidationError};
use crate::marketing::BannerBoard;
use crate::order::{CustomerInfo, OrderLedger, TransitionPolicy};
use crate::seed::{seed_banners, seed_orders, seed_products};
use crate::types::{MarketingBanner, OrderStatus, Product};
use crate::wishlist::Wishlist;

// =============================================================================
// Collections
// =============================================================================

/// A persisted collection and its storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Products,
    Cart,
    Orders,
    Wishlist,
    Banners,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Products,
        Collection::Cart,
        Collection::Orders,
        Collection::Wishlist,
        Collection::Banners,
    ];

    /// Key in the key-value store.
    pub const fn key(&self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Cart => "cart",
            Collection::Orders => "orders",
            Collection::Wishlist => "wishlist",
            Collection::Banners => "banners",
        }
    }
}

impl std::str::FromStr for Collection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Collection::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "collection".to_string(),
                reason: format!("unknown collection '{wanted}'"),
            })
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Actions
// =============================================================================

/// Every state change the storefront can make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddToCart {
        product_id: String,
    },
    RemoveFromCart {
        product_id: String,
    },
    UpdateQuantity {
        product_id: String,
        delta: i64,
    },
    PlaceOrder {
        customer: CustomerInfo,
        discount_percentage: u32,
        order_id: String,
        date: NaiveDate,
    },
    UpdateOrderStatus {
        order_id: String,
        status: OrderStatus,
        policy: TransitionPolicy,
    },
    AddProduct(Product),
    DeleteProduct {
        product_id: String,
    },
    ToggleWishlist {
        product_id: String,
    },
    AddBanner(MarketingBanner),
    RemoveBanner {
        banner_id: String,
    },
}

impl Action {
    /// Short name for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Action::AddToCart { .. } => "add_to_cart",
            Action::RemoveFromCart { .. } => "remove_from_cart",
            Action::UpdateQuantity { .. } => "update_quantity",
            Action::PlaceOrder { .. } => "place_order",
            Action::UpdateOrderStatus { .. } => "update_order_status",
            Action::AddProduct(_) => "add_product",
            Action::DeleteProduct { .. } => "delete_product",
            Action::ToggleWishlist { .. } => "toggle_wishlist",
            Action::AddBanner(_) => "add_banner",
            Action::RemoveBanner { .. } => "remove_banner",
        }
    }
}

// =============================================================================
// State
// =============================================================================

/// Everything the storefront persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub products: Catalog,
    pub cart: Cart,
    pub orders: OrderLedger,
    pub wishlist: Wishlist,
    pub banners: BannerBoard,
}

impl AppState {
    /// A fresh store: seed catalog, banners and orders; empty cart and wishlist.
    pub fn seeded() -> Self {
        Self {
            products: Catalog::from_products(seed_products()),
            cart: Cart::new(),
            orders: OrderLedger::from_orders(seed_orders()),
            wishlist: Wishlist::new(),
            banners: BannerBoard::from_banners(seed_banners()),
        }
    }

    /// Applies one action and reports which collections it changed.
    ///
    /// Unknown ids change nothing and report nothing. The only failures are
    /// a duplicate product or banner id and a transition the strict policy
    /// refuses; in every case the state is untouched.
    pub fn apply(&mut self, action: Action) -> CoreResult<Vec<Collection>> {
        let changed = match action {
            Action::AddToCart { product_id } => match self.products.get(&product_id) {
                Some(product) => {
                    self.cart.add_to_cart(product);
                    vec![Collection::Cart]
                }
                None => Vec::new(),
            },
            Action::RemoveFromCart { product_id } => {
                touched(self.cart.remove_from_cart(&product_id), Collection::Cart)
            }
            Action::UpdateQuantity { product_id, delta } => touched(
                self.cart.update_quantity(&product_id, delta),
                Collection::Cart,
            ),
            Action::PlaceOrder {
                customer,
                discount_percentage,
                order_id,
                date,
            } => {
                self.orders
                    .place_order(&mut self.cart, customer, discount_percentage, order_id, date);
                vec![Collection::Orders, Collection::Cart]
            }
            Action::UpdateOrderStatus {
                order_id,
                status,
                policy,
            } => touched(
                self.orders.update_status(&order_id, status, policy)?,
                Collection::Orders,
            ),
            Action::AddProduct(product) => {
                self.products.add(product)?;
                vec![Collection::Products]
            }
            Action::DeleteProduct { product_id } => {
                touched(self.products.delete(&product_id), Collection::Products)
            }
            Action::ToggleWishlist { product_id } => {
                self.wishlist.toggle(&product_id);
                vec![Collection::Wishlist]
            }
            Action::AddBanner(banner) => {
                self.banners.add(banner)?;
                vec![Collection::Banners]
            }
            Action::RemoveBanner { banner_id } => {
                touched(self.banners.remove(&banner_id), Collection::Banners)
            }
        };
        Ok(changed)
    }

    /// The JSON value stored under a collection's key.
    pub fn collection_json(&self, collection: Collection) -> serde_json::Result<serde_json::Value> {
        match collection {
            Collection::Products => serde_json::to_value(&self.products),
            Collection::Cart => serde_json::to_value(&self.cart),
            Collection::Orders => serde_json::to_value(&self.orders),
            Collection::Wishlist => serde_json::to_value(&self.wishlist),
            Collection::Banners => serde_json::to_value(&self.banners),
        }
    }
}

fn touched(changed: bool, collection: Collection) -> Vec<Collection> {
    if changed {
        vec![collection]
    } else {
        Vec::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "Jordan Rivera".to_string(),
            email: "jordan@example.com".to_string(),
        }
    }

    fn add(state: &mut AppState, id: &str) -> Vec<Collection> {
        state
            .apply(Action::AddToCart {
                product_id: id.to_string(),
            })
            .unwrap()
    }

    #[test]
    fn test_seeded_state() {
        let state = AppState::seeded();
        assert_eq!(state.products.len(), 7);
        assert_eq!(state.orders.len(), 1);
        assert_eq!(state.banners.len(), 1);
        assert!(state.cart.is_empty());
        assert!(state.wishlist.is_empty());
    }

    #[test]
    fn test_add_to_cart_reports_cart() {
        let mut state = AppState::seeded();
        assert_eq!(add(&mut state, "1"), vec![Collection::Cart]);
        assert_eq!(add(&mut state, "missing"), Vec::<Collection>::new());
        assert_eq!(state.cart.item_count(), 1);
    }

    #[test]
    fn test_place_order_touches_orders_and_cart() {
        let mut state = AppState::seeded();
        add(&mut state, "5"); // $1,999.00, free shipping

        let changed = state
            .apply(Action::PlaceOrder {
                customer: customer(),
                discount_percentage: 20,
                order_id: "ORD-44444".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
            })
            .unwrap();

        assert_eq!(changed, vec![Collection::Orders, Collection::Cart]);
        assert!(state.cart.is_empty());
        let order = &state.orders.orders()[0];
        assert_eq!(order.id, "ORD-44444");
        assert_eq!(order.total_cents, 199_900 - 39_980);
    }

    #[test]
    fn test_deleted_product_survives_in_cart_and_orders() {
        let mut state = AppState::seeded();
        add(&mut state, "2");

        state
            .apply(Action::DeleteProduct {
                product_id: "2".to_string(),
            })
            .unwrap();

        assert!(state.products.get("2").is_none());
        assert_eq!(state.cart.items()[0].product.name, "Nebula Pro Headphones");
        assert_eq!(
            state.orders.orders()[0].items[0].product.name,
            "Horizon Smart Watch V2"
        );
    }

    #[test]
    fn test_strict_rejection_leaves_state_alone() {
        let mut state = AppState::seeded();
        let before = state.clone();

        let result = state.apply(Action::UpdateOrderStatus {
            order_id: "ORD-5501".to_string(),
            status: OrderStatus::Pending,
            policy: TransitionPolicy::Strict,
        });

        assert!(matches!(result, Err(CoreError::IllegalTransition { .. })));
        assert_eq!(state, before);
    }

    #[test]
    fn test_no_op_actions_report_nothing() {
        let mut state = AppState::seeded();
        for action in [
            Action::RemoveFromCart {
                product_id: "9".to_string(),
            },
            Action::UpdateQuantity {
                product_id: "9".to_string(),
                delta: 1,
            },
            Action::DeleteProduct {
                product_id: "9".to_string(),
            },
            Action::RemoveBanner {
                banner_id: "b9".to_string(),
            },
            Action::UpdateOrderStatus {
                order_id: "ORD-0".to_string(),
                status: OrderStatus::Shipped,
                policy: TransitionPolicy::Permissive,
            },
        ] {
            assert!(state.apply(action).unwrap().is_empty());
        }
    }

    #[test]
    fn test_collection_json_round_trips_state() {
        let mut state = AppState::seeded();
        add(&mut state, "3");
        state
            .apply(Action::ToggleWishlist {
                product_id: "3".to_string(),
            })
            .unwrap();

        let cart: Cart = serde_json::from_value(state.collection_json(Collection::Cart).unwrap()).unwrap();
        let wishlist: Wishlist =
            serde_json::from_value(state.collection_json(Collection::Wishlist).unwrap()).unwrap();

        assert_eq!(cart, state.cart);
        assert_eq!(wishlist.ids(), ["3".to_string()]);
    }

    #[test]
    fn test_collection_keys() {
        let keys: Vec<&str> = Collection::ALL.iter().map(Collection::key).collect();
        assert_eq!(keys, vec!["products", "cart", "orders", "wishlist", "banners"]);
    }

    #[test]
    fn test_collection_parse() {
        assert_eq!("Orders".parse::<Collection>().unwrap(), Collection::Orders);
        assert_eq!(" cart ".parse::<Collection>().unwrap(), Collection::Cart);
        assert!("reviews".parse::<Collection>().is_err());
    }
}
