//! # Marketing Banners
//!
//! Hero banners shown on the storefront home page, managed from the admin
//! console. Copy for a banner can be drafted by the AI gateway; this module
//! only stores what the admin finally publishes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::MarketingBanner;

/// Gradient tokens offered by the banner form.
pub const GRADIENT_PALETTE: [&str; 4] = [
    "from-slate-900 to-indigo-950",
    "from-indigo-600 to-purple-800",
    "from-rose-600 to-amber-500",
    "from-emerald-600 to-teal-800",
];

pub const DEFAULT_BANNER_TITLE: &str = "Untitled Campaign";
pub const DEFAULT_BANNER_CTA: &str = "Shop Now";

/// Published banners, newest first.
///
/// Serializes as a bare array, the persisted `banners` collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BannerBoard {
    banners: Vec<MarketingBanner>,
}

impl BannerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_banners(banners: Vec<MarketingBanner>) -> Self {
        Self { banners }
    }

    /// Publishes a banner at the front of the rotation.
    ///
    /// ## Errors
    /// `Duplicate` if a banner with the same id is already published.
    pub fn add(&mut self, banner: MarketingBanner) -> CoreResult<()> {
        if self.get(&banner.id).is_some() {
            return Err(CoreError::Validation(ValidationError::Duplicate {
                field: "banner id".to_string(),
                value: banner.id,
            }));
        }
        self.banners.insert(0, banner);
        Ok(())
    }

    pub fn get(&self, banner_id: &str) -> Option<&MarketingBanner> {
        self.banners.iter().find(|b| b.id == banner_id)
    }

    /// A fresh id for a banner created at `epoch_millis`.
    ///
    /// Two banners created in the same millisecond get consecutive stamps.
    pub fn next_id(&self, epoch_millis: i64) -> String {
        (epoch_millis..)
            .map(banner_id)
            .find(|id| self.get(id).is_none())
            .unwrap_or_else(|| banner_id(epoch_millis))
    }

    /// Returns whether a banner was removed.
    pub fn remove(&mut self, banner_id: &str) -> bool {
        let before = self.banners.len();
        self.banners.retain(|b| b.id != banner_id);
        self.banners.len() != before
    }

    pub fn banners(&self) -> &[MarketingBanner] {
        &self.banners
    }

    pub fn len(&self) -> usize {
        self.banners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }
}

/// The admin banner form. Blank fields fall back to the form defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct BannerDraft {
    pub title: String,
    pub subtitle: String,
    pub cta: String,
    pub bg_gradient: String,
}

impl BannerDraft {
    pub fn into_banner(self, id: String) -> MarketingBanner {
        fn or_default(value: String, fallback: &str) -> String {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                fallback.to_string()
            } else {
                trimmed.to_string()
            }
        }

        MarketingBanner {
            id,
            title: or_default(self.title, DEFAULT_BANNER_TITLE),
            subtitle: self.subtitle.trim().to_string(),
            cta: or_default(self.cta, DEFAULT_BANNER_CTA),
            bg_gradient: or_default(self.bg_gradient, GRADIENT_PALETTE[0]),
        }
    }
}

/// Banner ids are `b-` plus the creation time in epoch milliseconds.
pub fn banner_id(epoch_millis: i64) -> String {
    format!("b-{epoch_millis}")
}
