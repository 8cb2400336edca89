//! # AI Gateway
//!
//! The five operations the storefront offers, each wrapping one model call.
//!
//! ## Failure Contract
//! No operation returns an error. A failed call is logged at `warn` and
//! replaced by a fixed message; a blank answer gets its own message.
//!
//! ```text
//! ┌──────────────────────────────┬─────────────────────────────────────┬──────────────────────────────────┐
//! │ operation                    │ blank answer                        │ failure                          │
//! ├──────────────────────────────┼─────────────────────────────────────┼──────────────────────────────────┤
//! │ generate_marketing_campaign  │ Failed to generate campaign.        │ Error generating marketing copy. │
//! │ generate_product_description │ Failed to generate description.     │ Failed to generate description.  │
//! │ generate_product_image       │ None                                │ None                             │
//! │ visual_search                │ No similar products found.          │ Visual search unavailable.       │
//! │ shopping_assistant           │ I'm sorry, I couldn't process that. │ Offline.                         │
//! └──────────────────────────────┴─────────────────────────────────────┴──────────────────────────────────┘
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, warn};

use crate::campaign::CampaignCopy;
use crate::error::AiResult;
use crate::model::{GenerativeModel, InlineImage};
use crate::prompts;

pub const CAMPAIGN_EMPTY: &str = "Failed to generate campaign.";
pub const CAMPAIGN_FAILED: &str = "Error generating marketing copy.";
pub const DESCRIPTION_EMPTY: &str = "Failed to generate description.";
pub const DESCRIPTION_FAILED: &str = "Failed to generate description.";
pub const VISUAL_SEARCH_EMPTY: &str = "No similar products found.";
pub const VISUAL_SEARCH_FAILED: &str = "Visual search unavailable.";
pub const ASSISTANT_EMPTY: &str = "I'm sorry, I couldn't process that.";
pub const ASSISTANT_FAILED: &str = "Offline.";

/// MIME type sent with visual-search uploads.
pub const UPLOAD_MIME_TYPE: &str = "image/jpeg";

/// Prefix of generated image URIs.
pub const GENERATED_IMAGE_PREFIX: &str = "data:image/png;base64,";

/// Storefront-facing wrapper around a [`GenerativeModel`].
#[derive(Debug, Clone)]
pub struct AiGateway<M> {
    model: M,
}

impl<M: GenerativeModel> AiGateway<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Campaign text with `Title:`, `Subtitle:` and `CTA:` lines.
    pub async fn generate_marketing_campaign(&self, topic: &str) -> String {
        let result = self.model.generate_text(&prompts::campaign(topic)).await;
        text_or_fallback("campaign", result, CAMPAIGN_EMPTY, CAMPAIGN_FAILED)
    }

    /// Campaign text parsed into banner fields.
    pub async fn generate_campaign_copy(&self, topic: &str) -> CampaignCopy {
        CampaignCopy::parse(&self.generate_marketing_campaign(topic).await)
    }

    /// Product description. Empty `features` uses the stock feature list.
    pub async fn generate_product_description(
        &self,
        name: &str,
        category: &str,
        features: &[String],
    ) -> String {
        let prompt = prompts::product_description(name, category, features);
        let result = self.model.generate_text(&prompt).await;
        text_or_fallback("description", result, DESCRIPTION_EMPTY, DESCRIPTION_FAILED)
    }

    /// A `data:image/png;base64,...` URI, or `None` on any failure.
    pub async fn generate_product_image(&self, subject: &str) -> Option<String> {
        match self.model.generate_image(&prompts::product_image(subject)).await {
            Ok(Some(image)) if !image.data.is_empty() => {
                debug!(bytes = image.data.len(), "Generated product image");
                Some(format!("{GENERATED_IMAGE_PREFIX}{}", image.data))
            }
            Ok(_) => {
                debug!("Image model returned no image");
                None
            }
            Err(error) => {
                warn!(operation = "image", %error, "AI call failed, using fallback");
                None
            }
        }
    }

    /// Which inventory item an uploaded photo most resembles.
    ///
    /// `inventory` is the catalog's visual-search listing
    /// (`Name (ID: id), ...`).
    pub async fn visual_search(&self, image: &[u8], inventory: &str) -> String {
        let upload = InlineImage::new(UPLOAD_MIME_TYPE, STANDARD.encode(image));
        let result = self
            .model
            .analyze_image(&prompts::visual_search(inventory), &upload)
            .await;
        text_or_fallback(
            "visual_search",
            result,
            VISUAL_SEARCH_EMPTY,
            VISUAL_SEARCH_FAILED,
        )
    }

    /// Assistant reply. `inventory` is the catalog's assistant listing
    /// (`Name ($price), ...`).
    pub async fn shopping_assistant(&self, query: &str, inventory: &str) -> String {
        let result = self
            .model
            .generate_text(&prompts::shopping_assistant(query, inventory))
            .await;
        text_or_fallback("assistant", result, ASSISTANT_EMPTY, ASSISTANT_FAILED)
    }
}

fn text_or_fallback(
    operation: &'static str,
    result: AiResult<String>,
    empty: &str,
    failed: &str,
) -> String {
    match result {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            debug!(operation, "AI returned a blank answer");
            empty.to_string()
        }
        Err(error) => {
            warn!(operation, %error, "AI call failed, using fallback");
            failed.to_string()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
