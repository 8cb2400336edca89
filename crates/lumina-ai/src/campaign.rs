//! # Campaign Copy Extraction
//!
//! The campaign prompt asks for three labelled lines. Models decorate them
//! freely, so every field is matched on its own and falls back to a stock
//! line when missing.
//!
//! ```text
//! **Title:** Midnight Gala          ─► title    = "Midnight Gala"
//! - Subtitle: Dressed in starlight  ─► subtitle = "Dressed in starlight"
//! (no CTA line)                     ─► cta      = "Explore Now"
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Exclusive Summer Collection";
pub const DEFAULT_SUBTITLE: &str = "Experience the pinnacle of luxury design.";
pub const DEFAULT_CTA: &str = "Explore Now";

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| label_regex("title"));
static SUBTITLE_RE: LazyLock<Regex> = LazyLock::new(|| label_regex("subtitle"));
static CTA_RE: LazyLock<Regex> = LazyLock::new(|| label_regex("cta"));

/// `Label: value` at the start of a line, with optional bullet and bold
/// markers around the label.
fn label_regex(label: &str) -> Regex {
    Regex::new(&format!(
        r"(?im)^[ \t]*(?:[-*•>#][ \t]*)*(?:\*\*)?{label}(?:\*\*)?[ \t]*:(?:\*\*)?[ \t]*(.*)$"
    ))
    .expect("Invalid regex")
}

/// Title, subtitle and call to action for a banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignCopy {
    pub title: String,
    pub subtitle: String,
    pub cta: String,
}

impl Default for CampaignCopy {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            cta: DEFAULT_CTA.to_string(),
        }
    }
}

impl CampaignCopy {
    /// Extracts the three fields from model output. Never fails.
    pub fn parse(text: &str) -> Self {
        Self {
            title: extract(&TITLE_RE, text).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            subtitle: extract(&SUBTITLE_RE, text).unwrap_or_else(|| DEFAULT_SUBTITLE.to_string()),
            cta: extract(&CTA_RE, text).unwrap_or_else(|| DEFAULT_CTA.to_string()),
        }
    }
}

/// First non-empty value for the label.
fn extract(re: &Regex, text: &str) -> Option<String> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| clean(m.as_str()))
        .find(|value| !value.is_empty())
}

fn clean(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '*' || c == '"' || c == '[' || c == ']')
        .trim()
        .to_string()
}
