//! The raw generative capability.

use std::future::Future;

use crate::error::{AiError, AiResult};

/// Base64 image data with its MIME type, as it travels in request and
/// response parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    /// Standard base64, no `data:` prefix.
    pub data: String,
}

impl InlineImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// A generative model.
///
/// Implementations report failures as [`AiError`]; turning them into
/// user-facing fallbacks is [`AiGateway`](crate::AiGateway)'s job.
pub trait GenerativeModel: Send + Sync {
    /// Text completion for a prompt. An empty string is a valid answer.
    fn generate_text(&self, prompt: &str) -> impl Future<Output = AiResult<String>> + Send;

    /// Text answer about an image.
    fn analyze_image(
        &self,
        prompt: &str,
        image: &InlineImage,
    ) -> impl Future<Output = AiResult<String>> + Send;

    /// The first image the model produces for a prompt, if any.
    fn generate_image(
        &self,
        prompt: &str,
    ) -> impl Future<Output = AiResult<Option<InlineImage>>> + Send;
}

/// An absent model: every call fails with [`AiError::NotConfigured`].
///
/// Lets a store without an API key run with the gateway's fallbacks.
impl<M: GenerativeModel> GenerativeModel for Option<M> {
    async fn generate_text(&self, prompt: &str) -> AiResult<String> {
        match self {
            Some(model) => model.generate_text(prompt).await,
            None => Err(AiError::NotConfigured),
        }
    }

    async fn analyze_image(&self, prompt: &str, image: &InlineImage) -> AiResult<String> {
        match self {
            Some(model) => model.analyze_image(prompt, image).await,
            None => Err(AiError::NotConfigured),
        }
    }

    async fn generate_image(&self, prompt: &str) -> AiResult<Option<InlineImage>> {
        match self {
            Some(model) => model.generate_image(prompt).await,
            None => Err(AiError::NotConfigured),
        }
    }
}
