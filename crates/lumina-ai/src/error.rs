//! Error types for the generative model client.

use thiserror::Error;

/// Errors that can occur when calling a generative model.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error body.
    #[error("API error ({status}): {message}")]
    Api {
        /// Status string from the API, e.g. `INVALID_ARGUMENT`.
        status: String,
        /// Error message.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// No model is configured (no API key).
    #[error("no generative model configured")]
    NotConfigured,

    /// The client could not be built from its configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for model calls.
pub type AiResult<T> = Result<T, AiError>;

/// Error body returned by the generateContent endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}
