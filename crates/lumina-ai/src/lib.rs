//! # lumina-ai: Generative AI Gateway
//!
//! Everything the storefront asks of a generative model goes through this
//! crate.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  commands (admin / assistant)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AiGateway<M>            prompt wording, fallbacks, never fails         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  M: GenerativeModel      generate_text / analyze_image / generate_image │
//! │       │                  returns AiResult, typed failures               │
//! │       ▼                                                                 │
//! │  GeminiClient            POST {base}/models/{model}:generateContent     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tests inject scripted models; nothing in the test suite reaches the
//! network.

pub mod campaign;
pub mod error;
pub mod gateway;
pub mod gemini;
pub mod model;
pub mod prompts;

pub use campaign::CampaignCopy;
pub use error::{AiError, AiResult};
pub use gateway::AiGateway;
pub use gemini::{GeminiClient, GeminiConfig};
pub use model::{GenerativeModel, InlineImage};
