//! # Wishlist
//!
//! Product ids the shopper has hearted. Ids are kept even if the product is
//! later deleted from the catalog; the storefront simply skips them.

use serde::{Deserialize, Serialize};

/// Saved product ids, in the order they were saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    ids: Vec<String>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds from persisted ids, dropping repeats.
    pub fn from_ids(ids: Vec<String>) -> Self {
        let mut wishlist = Wishlist::new();
        for id in ids {
            if !wishlist.contains(&id) {
                wishlist.ids.push(id);
            }
        }
        wishlist
    }

    /// Adds the id if absent, removes it if present.
    ///
    /// Returns `true` when the product is now on the wishlist.
    pub fn toggle(&mut self, product_id: &str) -> bool {
        if self.contains(product_id) {
            self.ids.retain(|id| id != product_id);
            false
        } else {
            self.ids.push(product_id.to_string());
            true
        }
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.ids.iter().any(|id| id == product_id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut wishlist = Wishlist::new();

        assert!(wishlist.toggle("3"));
        assert!(wishlist.toggle("5"));
        assert!(!wishlist.toggle("3"));

        assert_eq!(wishlist.ids(), ["5".to_string()]);
    }

    #[test]
    fn test_from_ids_dedups() {
        let wishlist = Wishlist::from_ids(vec!["1".into(), "2".into(), "1".into()]);
        assert_eq!(wishlist.len(), 2);
    }
}
