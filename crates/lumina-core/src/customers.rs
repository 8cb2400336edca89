//! # Customers
//!
//! There is no customer table: customers are derived from the order ledger,
//! grouped by email.
//!
//! ## Aggregation
//! ```text
//! orders (newest first)
//!      │
//!      ▼
//! group by customer_email ──► first order seen = most recent
//!      │                        ├── name, last order date
//!      │                        └── later orders add count + spend
//!      ▼
//! tier = spent > $500 ? Platinum : Standard
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Order;

/// Lifetime spend above which a customer is Platinum ($500.00, exclusive).
pub const PLATINUM_THRESHOLD_CENTS: i64 = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CustomerTier {
    Standard,
    Platinum,
}

impl CustomerTier {
    pub fn for_spend(spent: Money) -> Self {
        if spent.cents() > PLATINUM_THRESHOLD_CENTS {
            CustomerTier::Platinum
        } else {
            CustomerTier::Standard
        }
    }
}

/// One row of the admin customers table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub name: String,
    pub email: String,
    pub order_count: u32,
    pub total_spent_cents: i64,
    #[ts(as = "String")]
    pub last_order: NaiveDate,
    pub tier: CustomerTier,
}

impl CustomerSummary {
    pub fn total_spent(&self) -> Money {
        Money::from_cents(self.total_spent_cents)
    }
}

/// Groups orders into customers, most recently active first.
///
/// Expects `orders` newest first, as the ledger stores them.
pub fn aggregate_customers(orders: &[Order]) -> Vec<CustomerSummary> {
    let mut customers: Vec<CustomerSummary> = Vec::new();

    for order in orders {
        match customers
            .iter_mut()
            .find(|c| c.email.eq_ignore_ascii_case(&order.customer_email))
        {
            Some(existing) => {
                existing.order_count += 1;
                existing.total_spent_cents += order.total_cents;
            }
            None => customers.push(CustomerSummary {
                name: order.customer_name.clone(),
                email: order.customer_email.clone(),
                order_count: 1,
                total_spent_cents: order.total_cents,
                last_order: order.date,
                tier: CustomerTier::Standard,
            }),
        }
    }

    for customer in &mut customers {
        customer.tier = CustomerTier::for_spend(customer.total_spent());
    }
    customers
}

/// Total spend divided by customer count (zero customers counts as one).
pub fn average_customer_value(customers: &[CustomerSummary]) -> Money {
    let total: Money = customers.iter().map(CustomerSummary::total_spent).sum();
    let count = customers.len().max(1) as i64;
    Money::from_cents(total.cents() / count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderStatus;

    fn order(id: &str, name: &str, email: &str, total: i64, day: u32) -> Order {
        Order {
            id: id.to_string(),
            customer_name: name.to_string(),
            customer_email: email.to_string(),
            items: Vec::new(),
            total_cents: total,
            discount_applied: 0,
            status: OrderStatus::Pending,
            tracking_number: None,
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
        }
    }

    #[test]
    fn test_groups_by_email_and_keeps_latest_name() {
        let orders = vec![
            order("ORD-3", "Alex J.", "alex@example.com", 30000, 3),
            order("ORD-2", "Sam Lee", "sam@example.com", 4500, 2),
            order("ORD-1", "Alex Johnson", "alex@example.com", 29999, 1),
        ];

        let customers = aggregate_customers(&orders);

        assert_eq!(customers.len(), 2);
        let alex = &customers[0];
        assert_eq!(alex.name, "Alex J.");
        assert_eq!(alex.order_count, 2);
        assert_eq!(alex.total_spent_cents, 59999);
        assert_eq!(alex.last_order.to_string(), "2024-06-03");
        assert_eq!(alex.tier, CustomerTier::Platinum);
        assert_eq!(customers[1].tier, CustomerTier::Standard);
    }

    #[test]
    fn test_platinum_threshold_is_strict() {
        assert_eq!(CustomerTier::for_spend(Money::from_cents(50000)), CustomerTier::Standard);
        assert_eq!(CustomerTier::for_spend(Money::from_cents(50001)), CustomerTier::Platinum);
    }

    #[test]
    fn test_average_customer_value() {
        assert_eq!(average_customer_value(&[]), Money::zero());

        let orders = vec![
            order("ORD-2", "Sam Lee", "sam@example.com", 10000, 2),
            order("ORD-1", "Alex Johnson", "alex@example.com", 30000, 1),
        ];
        let customers = aggregate_customers(&orders);
        assert_eq!(average_customer_value(&customers).cents(), 20000);
    }
}
