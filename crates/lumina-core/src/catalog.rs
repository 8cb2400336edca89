//! # Catalog
//!
//! The product list plus the read-side helpers the storefront builds its
//! pages from, and the admin product form.
//!
//! ## Storefront Views
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  categories()         distinct categories, first-seen order             │
//! │  by_category("All")   every product                                     │
//! │  deals_of_the_day()   savings > $50, first four                         │
//! │  assistant_inventory  "Name ($price), ..."   chat assistant context     │
//! │  visual_inventory     "Name (ID: id), ..."   visual search context      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_product_draft, ValidationResult};
use crate::ALL_CATEGORIES;

/// Minimum markdown for the "Deals of the Day" strip ($50.00, exclusive).
pub const DEAL_MIN_SAVINGS_CENTS: i64 = 5_000;

/// How many deals the strip shows.
pub const DEALS_SHOWN: usize = 4;

// =============================================================================
// Catalog
// =============================================================================

/// Every product in the store, newest first.
///
/// Serializes as a bare array, the persisted `products` collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Adds a product at the front of the list.
    ///
    /// ## Errors
    /// `Duplicate` if a product with the same id exists.
    pub fn add(&mut self, product: Product) -> CoreResult<()> {
        if self.get(&product.id).is_some() {
            return Err(CoreError::Validation(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id,
            }));
        }
        self.products.insert(0, product);
        Ok(())
    }

    /// Deletes a product. Carts and orders holding a copy keep theirs.
    ///
    /// Returns whether anything was removed.
    pub fn delete(&mut self, product_id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != product_id);
        self.products.len() != before
    }

    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }

    /// Products in `category`; [`ALL_CATEGORIES`] means no filter.
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| category == ALL_CATEGORIES || p.category == category)
            .collect()
    }

    /// Products marked down by more than $50, at most four.
    pub fn deals_of_the_day(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.savings().cents() > DEAL_MIN_SAVINGS_CENTS)
            .take(DEALS_SHOWN)
            .collect()
    }

    /// `Horizon Smart Watch V2 ($199.99), Nebula Pro Headphones ($249.00), ...`
    pub fn assistant_inventory(&self) -> String {
        self.products
            .iter()
            .map(|p| format!("{} ({})", p.name, p.price()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `Horizon Smart Watch V2 (ID: 1), Nebula Pro Headphones (ID: 2), ...`
    pub fn visual_search_inventory(&self) -> String {
        self.products
            .iter()
            .map(|p| format!("{} (ID: {})", p.name, p.id))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// The admin "add product" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub original_price_cents: Option<i64>,
    pub category: String,
    /// Left empty, a placeholder image seeded by the product name is used.
    pub image: Option<String>,
    pub stock: u32,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price_cents: 0,
            original_price_cents: None,
            category: "Electronics".to_string(),
            image: None,
            stock: 10,
        }
    }
}

impl ProductDraft {
    /// Validates the form and builds a product with the given id.
    pub fn into_product(self, id: String) -> ValidationResult<Product> {
        validate_product_draft(&self)?;

        let name = self.name.trim().to_string();
        let image = match self.image.map(|i| i.trim().to_string()) {
            Some(image) if !image.is_empty() => image,
            _ => placeholder_image(&name),
        };

        Ok(Product {
            id,
            description: self.description.trim().to_string(),
            price_cents: self.price_cents,
            original_price_cents: self.original_price_cents,
            category: self.category.trim().to_string(),
            image,
            stock: self.stock,
            reviews: None,
            name,
        })
    }

    /// Validates the form and builds a product with a fresh id.
    pub fn into_new_product(self) -> ValidationResult<Product> {
        self.into_product(new_product_id())
    }

    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A fresh product id.
pub fn new_product_id() -> String {
    Uuid::new_v4().to_string()
}

/// `https://picsum.photos/seed/{name}/600/600` with the name made URL safe.
pub fn placeholder_image(name: &str) -> String {
    let seed: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("https://picsum.photos/seed/{seed}/600/600")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_products;

    fn catalog() -> Catalog {
        Catalog::from_products(seed_products())
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(
            catalog().categories(),
            vec!["Electronics", "Accessories", "Home Office", "Photography", "Lifestyle"]
        );
    }

    #[test]
    fn test_by_category() {
        let catalog = catalog();
        assert_eq!(catalog.by_category(ALL_CATEGORIES).len(), 7);
        assert_eq!(catalog.by_category("Home Office").len(), 2);
        assert!(catalog.by_category("Garden").is_empty());
    }

    #[test]
    fn test_deals_of_the_day() {
        let catalog = catalog();
        let deals = catalog.deals_of_the_day();
        let ids: Vec<&str> = deals.iter().map(|p| p.id.as_str()).collect();
        // The lamp saves only $30.00; the keyboard qualifies but is fifth.
        assert_eq!(ids, vec!["1", "2", "3", "5"]);
    }

    #[test]
    fn test_add_puts_product_first_and_rejects_duplicates() {
        let mut catalog = catalog();
        let draft = ProductDraft {
            name: "Aurora Speaker".to_string(),
            price_cents: 8900,
            ..ProductDraft::default()
        };
        let product = draft.into_product("new-1".to_string()).unwrap();

        catalog.add(product.clone()).unwrap();
        assert_eq!(catalog.products()[0].id, "new-1");

        assert!(matches!(
            catalog.add(product),
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
        assert_eq!(catalog.len(), 8);
    }

    #[test]
    fn test_delete_missing_is_no_op() {
        let mut catalog = catalog();
        assert!(!catalog.delete("missing"));
        assert!(catalog.delete("7"));
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn test_draft_defaults_and_placeholder_image() {
        let draft = ProductDraft {
            name: "  Lumen Mouse ".to_string(),
            price_cents: 2500,
            ..ProductDraft::default()
        };
        let product = draft.into_new_product().unwrap();

        assert_eq!(product.name, "Lumen Mouse");
        assert_eq!(product.category, "Electronics");
        assert_eq!(product.stock, 10);
        assert_eq!(product.image, "https://picsum.photos/seed/Lumen-Mouse/600/600");
        assert!(!product.id.is_empty());
    }

    #[test]
    fn test_draft_requires_name_and_price() {
        assert!(ProductDraft::default().into_new_product().is_err());

        let no_price = ProductDraft {
            name: "Widget".to_string(),
            ..ProductDraft::default()
        };
        assert!(matches!(
            no_price.into_new_product(),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_inventory_strings() {
        let catalog = Catalog::from_products(seed_products().into_iter().take(2).collect());

        assert_eq!(
            catalog.assistant_inventory(),
            "Horizon Smart Watch V2 ($199.99), Nebula Pro Headphones ($249.00)"
        );
        assert_eq!(
            catalog.visual_search_inventory(),
            "Horizon Smart Watch V2 (ID: 1), Nebula Pro Headphones (ID: 2)"
        );
    }
}
