//! # Admin Commands
//!
//! The back office: inventory, orders, customers, the dashboard and
//! marketing. The AI drafting commands never fail; a model outage shows up
//! as the gateway's fallback text.

use chrono::Utc;
use lumina_ai::{AiGateway, GenerativeModel};
use lumina_core::analytics::{dashboard as dashboard_stats, DashboardStats};
use lumina_core::catalog::ProductDraft;
use lumina_core::customers::{aggregate_customers, average_customer_value, CustomerSummary};
use lumina_core::marketing::BannerDraft;
use lumina_core::order::TransitionPolicy;
use lumina_core::seed::{monthly_sales, MonthlySales};
use lumina_core::state::Action;
use lumina_core::{MarketingBanner, Order, OrderStatus, Product};
use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::{ApiError, ApiResult};
use crate::persistence::KeyValueStore;
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomersResponse {
    pub customers: Vec<CustomerSummary>,
    pub average_value_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub monthly_sales: Vec<MonthlySales>,
}

// =============================================================================
// Inventory
// =============================================================================

/// Validates the form and puts the new product first in the catalog.
pub async fn add_product<S: KeyValueStore>(store: &Store<S>, draft: ProductDraft) -> ApiResult<Product> {
    debug!(name = %draft.name, "add_product command");

    let product = draft.into_new_product()?;
    store.dispatch(Action::AddProduct(product.clone())).await?;

    info!(product_id = %product.id, name = %product.name, price = %product.price(), "Product added");
    Ok(product)
}

/// Returns whether a product was removed. Carts and past orders keep their
/// own copies.
pub async fn delete_product<S: KeyValueStore>(store: &Store<S>, product_id: &str) -> ApiResult<bool> {
    debug!(product_id = %product_id, "delete_product command");

    let changed = store
        .dispatch(Action::DeleteProduct {
            product_id: product_id.to_string(),
        })
        .await?;

    if !changed.is_empty() {
        info!(product_id = %product_id, "Product deleted");
    }
    Ok(!changed.is_empty())
}

// =============================================================================
// Orders & Customers
// =============================================================================

/// Every order, newest first.
pub fn list_orders<S: KeyValueStore>(store: &Store<S>) -> Vec<Order> {
    store.with_state(|s| s.orders.orders().to_vec())
}

/// Sets an order's status.
///
/// ## Returns
/// - `Ok(true)` the status was written
/// - `Ok(false)` no order has that id
/// - `Err(ILLEGAL_TRANSITION)` only under [`TransitionPolicy::Strict`]
pub async fn update_order_status<S: KeyValueStore>(
    store: &Store<S>,
    policy: TransitionPolicy,
    order_id: &str,
    status: OrderStatus,
) -> ApiResult<bool> {
    debug!(order_id = %order_id, status = %status, ?policy, "update_order_status command");

    let changed = store
        .dispatch(Action::UpdateOrderStatus {
            order_id: order_id.to_string(),
            status,
            policy,
        })
        .await?;

    if !changed.is_empty() {
        info!(order_id = %order_id, status = %status, "Order status updated");
    }
    Ok(!changed.is_empty())
}

pub fn customers<S: KeyValueStore>(store: &Store<S>) -> CustomersResponse {
    let customers = store.with_state(|s| aggregate_customers(s.orders.orders()));
    CustomersResponse {
        average_value_cents: average_customer_value(&customers).cents(),
        customers,
    }
}

pub fn dashboard<S: KeyValueStore>(store: &Store<S>) -> DashboardResponse {
    DashboardResponse {
        stats: store.with_state(|s| dashboard_stats(s.products.products(), s.orders.orders())),
        monthly_sales: monthly_sales(),
    }
}

// =============================================================================
// Marketing
// =============================================================================

/// Publishes a banner ahead of the existing ones.
///
/// The id is stamped from the clock and drawn under the store lock, so two
/// banners published in the same millisecond still get distinct ids.
pub async fn add_banner<S: KeyValueStore>(store: &Store<S>, draft: BannerDraft) -> ApiResult<MarketingBanner> {
    let now = Utc::now().timestamp_millis();
    debug!(title = %draft.title, "add_banner command");

    let banner = store
        .dispatch_with(
            move |s| Ok(Action::AddBanner(draft.into_banner(s.banners.next_id(now)))),
            |s| s.banners.banners().first().cloned(),
        )
        .await?
        .ok_or_else(|| ApiError::internal("Published banner missing from the board"))?;

    info!(banner_id = %banner.id, title = %banner.title, "Banner published");
    Ok(banner)
}

pub async fn remove_banner<S: KeyValueStore>(store: &Store<S>, banner_id: &str) -> ApiResult<bool> {
    debug!(banner_id = %banner_id, "remove_banner command");

    let changed = store
        .dispatch(Action::RemoveBanner {
            banner_id: banner_id.to_string(),
        })
        .await?;
    Ok(!changed.is_empty())
}

// =============================================================================
// AI Drafting
// =============================================================================

/// Description text for the product form's "Auto-Write" button.
pub async fn draft_description<M: GenerativeModel>(
    gateway: &AiGateway<M>,
    name: &str,
    category: &str,
    features: &[String],
) -> String {
    debug!(name = %name, category = %category, "draft_description command");
    gateway.generate_product_description(name, category, features).await
}

/// A generated product photo as a data URI, or `None`.
pub async fn draft_product_image<M: GenerativeModel>(gateway: &AiGateway<M>, name: &str) -> Option<String> {
    debug!(name = %name, "draft_product_image command");
    gateway.generate_product_image(name).await
}

/// A banner form filled from a generated campaign. The gradient is left for
/// the admin to pick.
pub async fn draft_campaign<M: GenerativeModel>(gateway: &AiGateway<M>, topic: &str) -> BannerDraft {
    debug!(topic = %topic, "draft_campaign command");
    let copy = gateway.generate_campaign_copy(topic).await;
    BannerDraft {
        title: copy.title,
        subtitle: copy.subtitle,
        cta: copy.cta,
        bg_gradient: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::persistence::MemoryStore;
    use lumina_ai::{AiError, AiResult, InlineImage};

    async fn open() -> Store<MemoryStore> {
        Store::open(MemoryStore::new()).await.unwrap()
    }

    /// A model that is always down.
    struct Offline;

    impl GenerativeModel for Offline {
        async fn generate_text(&self, _prompt: &str) -> AiResult<String> {
            Err(AiError::Unauthorized("key revoked".to_string()))
        }

        async fn analyze_image(&self, _prompt: &str, _image: &InlineImage) -> AiResult<String> {
            Err(AiError::Unauthorized("key revoked".to_string()))
        }

        async fn generate_image(&self, _prompt: &str) -> AiResult<Option<InlineImage>> {
            Err(AiError::Unauthorized("key revoked".to_string()))
        }
    }

    /// Replies to text prompts with a fixed campaign.
    struct Copywriter;

    impl GenerativeModel for Copywriter {
        async fn generate_text(&self, _prompt: &str) -> AiResult<String> {
            Ok("**Title:** Autumn Atelier\n**Subtitle:** Warm tones, sharp lines.\n**CTA:** Browse".to_string())
        }

        async fn analyze_image(&self, _prompt: &str, _image: &InlineImage) -> AiResult<String> {
            Ok(String::new())
        }

        async fn generate_image(&self, _prompt: &str) -> AiResult<Option<InlineImage>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_add_product_goes_first() {
        let store = open().await;
        let draft = ProductDraft {
            name: "Aurora Speaker".to_string(),
            price_cents: 12_900,
            ..ProductDraft::default()
        };

        let product = add_product(&store, draft).await.unwrap();

        assert_eq!(product.category, "Electronics");
        assert_eq!(product.stock, 10);
        assert_eq!(store.with_state(|s| s.products.products()[0].id.clone()), product.id);
        assert!(store.persistence().snapshot("products").unwrap().contains("Aurora Speaker"));
    }

    #[tokio::test]
    async fn test_add_product_rejects_bad_price() {
        let store = open().await;
        let draft = ProductDraft {
            name: "Freebie".to_string(),
            price_cents: 0,
            ..ProductDraft::default()
        };

        let err = add_product(&store, draft).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(store.with_state(|s| s.products.len()), 7);
    }

    #[tokio::test]
    async fn test_delete_product_keeps_order_history() {
        let store = open().await;

        assert!(delete_product(&store, "1").await.unwrap());
        assert!(!delete_product(&store, "1").await.unwrap());

        let orders = list_orders(&store);
        assert_eq!(orders[0].items[0].product.name, "Horizon Smart Watch V2");
        assert_eq!(orders[0].total_cents, 29_999);
    }

    #[tokio::test]
    async fn test_status_update_under_both_policies() {
        let store = open().await;

        let err = update_order_status(&store, TransitionPolicy::Strict, "ORD-5501", OrderStatus::Pending)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::IllegalTransition);

        assert!(
            update_order_status(&store, TransitionPolicy::Permissive, "ORD-5501", OrderStatus::Pending)
                .await
                .unwrap()
        );
        assert_eq!(list_orders(&store)[0].status, OrderStatus::Pending);

        assert!(
            !update_order_status(&store, TransitionPolicy::Permissive, "ORD-0000", OrderStatus::Shipped)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_customers_and_dashboard() {
        let store = open().await;

        let report = customers(&store);
        assert_eq!(report.customers.len(), 1);
        assert_eq!(report.customers[0].email, "alex@example.com");
        assert_eq!(report.average_value_cents, 29_999);

        let board = dashboard(&store);
        assert_eq!(board.stats.total_revenue_cents, 29_999);
        assert_eq!(board.stats.product_count, 7);
        assert_eq!(board.monthly_sales.len(), 6);
    }

    #[tokio::test]
    async fn test_banner_lifecycle() {
        let store = open().await;

        let banner = add_banner(&store, BannerDraft::default()).await.unwrap();
        assert!(banner.id.starts_with("b-"));
        assert_eq!(banner.title, "Untitled Campaign");
        assert_eq!(store.with_state(|s| s.banners.banners()[0].id.clone()), banner.id);

        assert!(remove_banner(&store, &banner.id).await.unwrap());
        assert!(!remove_banner(&store, &banner.id).await.unwrap());
        assert_eq!(store.with_state(|s| s.banners.len()), 1);
    }

    #[tokio::test]
    async fn test_back_to_back_banners_are_removed_separately() {
        let store = open().await;

        let first = add_banner(&store, BannerDraft::default()).await.unwrap();
        let second = add_banner(&store, BannerDraft::default()).await.unwrap();
        assert_ne!(first.id, second.id);

        assert!(remove_banner(&store, &first.id).await.unwrap());
        store.with_state(|s| {
            assert_eq!(s.banners.len(), 2);
            assert!(s.banners.get(&second.id).is_some());
        });
    }

    #[tokio::test]
    async fn test_drafting_falls_back_when_offline() {
        let gateway = AiGateway::new(Offline);

        assert_eq!(
            draft_description(&gateway, "Lamp", "Home Office", &[]).await,
            "Failed to generate description."
        );
        assert_eq!(draft_product_image(&gateway, "Lamp").await, None);

        let draft = draft_campaign(&gateway, "Autumn").await;
        assert_eq!(draft.title, "Exclusive Summer Collection");
        assert_eq!(draft.cta, "Explore Now");
    }

    #[tokio::test]
    async fn test_draft_campaign_publishes() {
        let store = open().await;
        let draft = draft_campaign(&AiGateway::new(Copywriter), "Autumn").await;

        let banner = add_banner(&store, draft).await.unwrap();

        assert_eq!(banner.title, "Autumn Atelier");
        assert_eq!(banner.subtitle, "Warm tones, sharp lines.");
        assert_eq!(banner.cta, "Browse");
        assert_eq!(banner.bg_gradient, "from-slate-900 to-indigo-950");
    }
}
