//! # Discounts
//!
//! The static promo code registry and the single promo a checkout session
//! may have active.
//!
//! ## Promo Application
//! ```text
//! apply("summer25")
//!      │
//!      ▼
//! lookup (trimmed, case-insensitive)
//!      │
//!      ├── found ──► becomes THE active discount (replaces any previous one)
//!      │
//!      └── missing ─► InvalidPromoCode, previous discount untouched
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::DiscountCode;

// =============================================================================
// Registry
// =============================================================================

/// The promo codes the store honours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountRegistry {
    codes: Vec<DiscountCode>,
}

impl DiscountRegistry {
    pub fn new(codes: Vec<DiscountCode>) -> Self {
        Self { codes }
    }

    /// `LUMINA10`, `ADOBE20` and `SUMMER25`.
    pub fn builtin() -> Self {
        Self::new(crate::seed::discount_codes())
    }

    /// Finds a code ignoring case and surrounding whitespace.
    pub fn lookup(&self, code: &str) -> Option<&DiscountCode> {
        let wanted = code.trim();
        if wanted.is_empty() {
            return None;
        }
        self.codes
            .iter()
            .find(|candidate| candidate.code.eq_ignore_ascii_case(wanted))
    }

    pub fn codes(&self) -> &[DiscountCode] {
        &self.codes
    }
}

impl Default for DiscountRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

// =============================================================================
// Active Promo
// =============================================================================

/// The promo currently applied to the checkout session.
///
/// At most one code is active. This state is session-only and is never
/// persisted; the percentage is copied into the order when it is placed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PromoState {
    active: Option<DiscountCode>,
}

impl PromoState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `code` from `registry`.
    ///
    /// On an unknown code the previously active discount stays in place.
    pub fn apply(&mut self, registry: &DiscountRegistry, code: &str) -> CoreResult<&DiscountCode> {
        let found = registry
            .lookup(code)
            .cloned()
            .ok_or_else(|| CoreError::InvalidPromoCode(code.trim().to_string()))?;
        Ok(self.active.insert(found))
    }

    /// Drops the active discount.
    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&DiscountCode> {
        self.active.as_ref()
    }

    /// Percentage to price with, 0 when no promo is active.
    pub fn percentage(&self) -> u32 {
        self.active.as_ref().map_or(0, |code| code.percentage)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = DiscountRegistry::builtin();

        assert_eq!(registry.lookup("summer25").unwrap().percentage, 25);
        assert_eq!(registry.lookup("  Lumina10 ").unwrap().percentage, 10);
        assert_eq!(registry.lookup("ADOBE20").unwrap().percentage, 20);
        assert!(registry.lookup("SUMMER").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn test_new_code_replaces_old() {
        let registry = DiscountRegistry::builtin();
        let mut promo = PromoState::new();

        promo.apply(&registry, "LUMINA10").unwrap();
        promo.apply(&registry, "SUMMER25").unwrap();

        assert_eq!(promo.percentage(), 25);
        assert_eq!(promo.active().unwrap().code, "SUMMER25");
    }

    #[test]
    fn test_invalid_code_keeps_previous_discount() {
        let registry = DiscountRegistry::builtin();
        let mut promo = PromoState::new();
        promo.apply(&registry, "ADOBE20").unwrap();

        let err = promo.apply(&registry, "BOGUS").unwrap_err();

        assert!(matches!(err, CoreError::InvalidPromoCode(ref c) if c == "BOGUS"));
        assert_eq!(promo.percentage(), 20);
    }

    #[test]
    fn test_no_promo_means_zero() {
        let mut promo = PromoState::new();
        assert_eq!(promo.percentage(), 0);

        promo.apply(&DiscountRegistry::builtin(), "lumina10").unwrap();
        promo.clear();
        assert_eq!(promo.percentage(), 0);
    }
}
