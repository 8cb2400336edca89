//! Gemini API client.
//!
//! Implements [`GenerativeModel`] over the Google Generative Language
//! `generateContent` endpoint. Text and image generation use separate
//! models.

pub mod types;

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::error::{AiError, AiResult, ApiErrorResponse};
use crate::model::{GenerativeModel, InlineImage};

use self::types::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig, Part,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const IMAGE_ASPECT_RATIO: &str = "1:1";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: SecretString,
    pub text_model: String,
    pub image_model: String,
    /// API root, without a trailing slash.
    pub base_url: String,
}

impl GeminiConfig {
    /// Default models and endpoint for the given key.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Gemini API client. Cheap to clone.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    text_model: String,
    image_model: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("text_model", &self.inner.text_model)
            .field("image_model", &self.inner.image_model)
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Config`] if the API key isn't a valid header value,
    /// or [`AiError::Http`] if the HTTP client can't be built.
    pub fn new(config: &GeminiConfig) -> AiResult<Self> {
        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| AiError::Config("API key contains invalid characters".to_string()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, api_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                text_model: config.text_model.clone(),
                image_model: config.image_model.clone(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.inner.base_url, model)
    }

    /// POST a request to `model` and decode the response.
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> AiResult<GenerateContentResponse> {
        let response = self
            .inner
            .client
            .post(self.endpoint(model))
            .json(request)
            .send()
            .await?;

        let parsed = self.handle_response(response).await?;
        debug!(candidates = parsed.candidates.len(), "generateContent returned");
        Ok(parsed)
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> AiResult<GenerateContentResponse> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| AiError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(self.handle_error_status(status, response).await)
        }
    }

    async fn handle_error_status(
        &self,
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> AiError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return AiError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return AiError::Unauthorized("API key rejected".to_string());
        }

        match response.text().await {
            Ok(body) => match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_error) => AiError::Api {
                    status: api_error.error.status,
                    message: api_error.error.message,
                },
                Err(_) => AiError::Api {
                    status: status.to_string(),
                    message: body,
                },
            },
            Err(e) => AiError::Http(e),
        }
    }
}

impl GenerativeModel for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.inner.text_model))]
    async fn generate_text(&self, prompt: &str) -> AiResult<String> {
        let request = GenerateContentRequest::from_parts(vec![Part::text(prompt)]);
        let response = self
            .generate_content(&self.inner.text_model, &request)
            .await?;
        Ok(response.text())
    }

    #[instrument(skip(self, prompt, image), fields(model = %self.inner.text_model, mime = %image.mime_type))]
    async fn analyze_image(&self, prompt: &str, image: &InlineImage) -> AiResult<String> {
        let request =
            GenerateContentRequest::from_parts(vec![Part::image(image), Part::text(prompt)]);
        let response = self
            .generate_content(&self.inner.text_model, &request)
            .await?;
        Ok(response.text())
    }

    #[instrument(skip(self, prompt), fields(model = %self.inner.image_model))]
    async fn generate_image(&self, prompt: &str) -> AiResult<Option<InlineImage>> {
        let request = GenerateContentRequest::from_parts(vec![Part::text(prompt)])
            .with_generation_config(GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: IMAGE_ASPECT_RATIO.to_string(),
                }),
            });
        let response = self
            .generate_content(&self.inner.image_model, &request)
            .await?;
        Ok(response.first_inline_image())
    }
}
