//! # Dashboard Analytics
//!
//! Headline figures for the admin dashboard, computed on demand from the
//! catalog and the ledger.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Order, OrderStatus, Product};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: String,
    pub products: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: OrderStatus,
    pub orders: u32,
}

/// Everything the dashboard cards and charts show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Sum of every order total, regardless of status.
    pub total_revenue_cents: i64,
    pub order_count: u32,
    pub product_count: u32,
    /// Products per category, first-seen order.
    pub categories: Vec<CategoryCount>,
    /// Orders per status, lifecycle order, zero counts included.
    pub statuses: Vec<StatusCount>,
}

impl DashboardStats {
    pub fn total_revenue(&self) -> Money {
        Money::from_cents(self.total_revenue_cents)
    }
}

pub fn dashboard(products: &[Product], orders: &[Order]) -> DashboardStats {
    let mut categories: Vec<CategoryCount> = Vec::new();
    for product in products {
        match categories.iter_mut().find(|c| c.category == product.category) {
            Some(entry) => entry.products += 1,
            None => categories.push(CategoryCount {
                category: product.category.clone(),
                products: 1,
            }),
        }
    }

    let statuses = OrderStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            orders: orders.iter().filter(|o| o.status == status).count() as u32,
        })
        .collect();

    DashboardStats {
        total_revenue_cents: orders.iter().map(|o| o.total_cents).sum(),
        order_count: orders.len() as u32,
        product_count: products.len() as u32,
        categories,
        statuses,
    }
}
