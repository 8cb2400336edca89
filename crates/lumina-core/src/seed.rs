//! # Seed Data
//!
//! What a brand new store starts with, and what each persisted collection
//! falls back to when it is missing.
//!
//! | Collection | Seed                                   |
//! |------------|----------------------------------------|
//! | products   | seven launch products                  |
//! | banners    | "The Grand Electronics Sale"           |
//! | orders     | one delivered historical order         |
//! | cart       | empty                                  |
//! | wishlist   | empty                                  |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{CartItem, DiscountCode, MarketingBanner, Order, OrderStatus, Product};

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/photo-{photo}?q=80&w=600&h=600&auto=format&fit=crop")
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    price_cents: i64,
    original_price_cents: i64,
    category: &str,
    photo: &str,
    stock: u32,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price_cents,
        original_price_cents: Some(original_price_cents),
        category: category.to_string(),
        image: unsplash(photo),
        stock,
        reviews: None,
    }
}

/// The launch catalog.
pub fn seed_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Horizon Smart Watch V2",
            "A premium smartwatch with heart rate monitoring, GPS tracking, and a sleek titanium finish.",
            19_999,
            34_900,
            "Electronics",
            "1546868871-7041f2a55e12",
            25,
        ),
        product(
            "2",
            "Nebula Pro Headphones",
            "Experience pure sound with industry-leading noise cancellation and 40-hour battery life.",
            24_900,
            39_900,
            "Electronics",
            "1505740420928-5e560c06d30e",
            12,
        ),
        product(
            "3",
            "Artisan Leather Weekender",
            "Hand-crafted top-grain leather bag perfect for short trips and professional travel.",
            12_950,
            18_950,
            "Accessories",
            "1547949003-9792a18a2601",
            8,
        ),
        product(
            "4",
            "Lumina Desk Lamp",
            "Minimalist LED desk lamp with adjustable color temperature and wireless charging base.",
            4_999,
            7_999,
            "Home Office",
            "1534073828943-f801091bb18c",
            40,
        ),
        product(
            "5",
            "Zenith 4K Pro Camera",
            "Capture world-class imagery with full-frame sensor technology and legendary optical precision.",
            199_900,
            249_900,
            "Photography",
            "1516035069371-29a1b244cc32",
            5,
        ),
        product(
            "6",
            "Onyx Mechanical Keyboard",
            "Tactile perfection meets aesthetic brilliance. Custom switches and aerospace-grade aluminum.",
            15_900,
            21_000,
            "Home Office",
            "1511467687858-23d96c32e4ae",
            15,
        ),
        product(
            "7",
            "Elysian Smart Espresso",
            "App-controlled brewing system that delivers barista-quality coffee with a single touch.",
            69_900,
            85_000,
            "Lifestyle",
            "1495474472287-4d71bcdd2085",
            10,
        ),
    ]
}

/// The promo codes the store honours.
pub fn discount_codes() -> Vec<DiscountCode> {
    [
        ("LUMINA10", 10, "10% New Customer Discount"),
        ("ADOBE20", 20, "Enterprise Partner Discount"),
        ("SUMMER25", 25, "Flash Summer Sale"),
    ]
    .into_iter()
    .map(|(code, percentage, description)| DiscountCode {
        code: code.to_string(),
        percentage,
        description: description.to_string(),
    })
    .collect()
}

pub fn seed_banners() -> Vec<MarketingBanner> {
    vec![MarketingBanner {
        id: "b1".to_string(),
        title: "The Grand Electronics Sale".to_string(),
        subtitle: "Up to 60% Off on Premium Tech & Accessories.".to_string(),
        cta: "Shop Now".to_string(),
        bg_gradient: "from-blue-700 to-indigo-900".to_string(),
    }]
}

/// One delivered order so the admin console isn't empty on day one.
///
/// Its total predates the current pricing rules and is kept as recorded.
pub fn seed_orders() -> Vec<Order> {
    let watch = seed_products().swap_remove(0);
    vec![Order {
        id: "ORD-5501".to_string(),
        customer_name: "Alex Johnson".to_string(),
        customer_email: "alex@example.com".to_string(),
        items: vec![CartItem::new(watch)],
        total_cents: 29_999,
        discount_applied: 0,
        status: OrderStatus::Delivered,
        tracking_number: Some("LX-8822001".to_string()),
        date: NaiveDate::from_ymd_opt(2024, 5, 15).unwrap_or_default(),
    }]
}

/// A point on the dashboard's revenue trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    pub month: String,
    pub sales_cents: i64,
}

/// Historical monthly revenue shown on the dashboard chart.
pub fn monthly_sales() -> Vec<MonthlySales> {
    [
        ("Jan", 42_000),
        ("Feb", 38_000),
        ("Mar", 56_000),
        ("Apr", 49_000),
        ("May", 72_000),
        ("Jun", 89_000),
    ]
    .into_iter()
    .map(|(month, dollars)| MonthlySales {
        month: month.to_string(),
        sales_cents: dollars * 100,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_unique() {
        let products = seed_products();
        let mut ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 7);
    }

    #[test]
    fn test_seed_order() {
        let orders = seed_orders();
        assert_eq!(orders[0].id, "ORD-5501");
        assert_eq!(orders[0].items[0].product.name, "Horizon Smart Watch V2");
        assert_eq!(orders[0].date.to_string(), "2024-05-15");
    }

    #[test]
    fn test_seed_prices_are_marked_down() {
        for product in seed_products() {
            assert!(product.original_price_cents.unwrap() > product.price_cents);
        }
    }
}
