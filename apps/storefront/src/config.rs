//! # Storefront Configuration
//!
//! ## Load Order (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`lumina.toml` in the platform config directory, or an
//!    explicit `--config` path)
//! 3. Environment variables (`LUMINA_*`)
//! 4. Validation
//!
//! ## Example `lumina.toml`
//! ```toml
//! [store]
//! name = "Lumina Luxe"
//!
//! [database]
//! path = "/var/lib/lumina/lumina.db"
//! max_connections = 4
//! connect_timeout_secs = 30
//!
//! [orders]
//! transition_policy = "strict"
//!
//! [ai]
//! api_key = "..."
//! text_model = "gemini-3-flash-preview"
//! image_model = "gemini-2.5-flash-image"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use lumina_ai::gemini::{DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};
use lumina_ai::GeminiConfig;
use lumina_core::order::TransitionPolicy;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration errors. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine the platform data directory")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Store name, for logs and the CLI banner.
    pub name: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            name: "Lumina Luxe".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Database file. Unset means `lumina.db` in the platform data directory.
    pub path: Option<PathBuf>,
    pub max_connections: u32,
    /// How long to wait for a pooled connection.
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: 4,
            connect_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrdersSection {
    pub transition_policy: TransitionPolicy,
}

/// Generative AI settings. Without a key the AI features answer with their
/// fallback messages.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AiSection {
    #[serde(deserialize_with = "deserialize_secret")]
    pub api_key: Option<SecretString>,
    pub text_model: String,
    pub image_model: String,
    pub base_url: String,
}

impl Default for AiSection {
    fn default() -> Self {
        Self {
            api_key: None,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl std::fmt::Debug for AiSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiSection")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AiSection {
    /// Client settings, if a key is configured.
    pub fn gemini(&self) -> Option<GeminiConfig> {
        self.api_key.as_ref().map(|key| GeminiConfig {
            api_key: key.clone(),
            text_model: self.text_model.clone(),
            image_model: self.image_model.clone(),
            base_url: self.base_url.clone(),
        })
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(SecretString::from))
}

// =============================================================================
// Storefront Config
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub store: StoreSection,
    pub database: DatabaseSection,
    pub orders: OrdersSection,
    pub ai: AiSection,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Applies `LUMINA_*` overrides read through `var`.
    ///
    /// Takes the lookup as a function so tests don't touch the process
    /// environment.
    pub fn apply_env_overrides<F>(&mut self, var: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = var("LUMINA_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(name) = var("LUMINA_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(policy) = var("LUMINA_TRANSITION_POLICY") {
            self.orders.transition_policy = policy.parse().map_err(|_| {
                ConfigError::InvalidEnvVar(
                    "LUMINA_TRANSITION_POLICY".to_string(),
                    format!("expected 'permissive' or 'strict', got '{policy}'"),
                )
            })?;
        }

        if let Some(key) = var("LUMINA_AI_API_KEY").or_else(|| var("GEMINI_API_KEY")) {
            if !key.trim().is_empty() {
                self.ai.api_key = Some(SecretString::from(key));
            }
        }

        if let Some(model) = var("LUMINA_AI_TEXT_MODEL") {
            self.ai.text_model = model;
        }

        if let Some(model) = var("LUMINA_AI_IMAGE_MODEL") {
            self.ai.image_model = model;
        }

        if let Some(url) = var("LUMINA_AI_BASE_URL") {
            debug!(url = %url, "Overriding AI endpoint from environment");
            self.ai.base_url = url;
        }

        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        if self.database.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "database.connect_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.ai.text_model.trim().is_empty() || self.ai.image_model.trim().is_empty() {
            return Err(ConfigError::Invalid("ai model names must not be empty".into()));
        }

        if !self.ai.base_url.starts_with("https://") && !self.ai.base_url.starts_with("http://") {
            return Err(ConfigError::Invalid(format!(
                "ai.base_url must start with http:// or https://, got: {}",
                self.ai.base_url
            )));
        }

        if let Some(key) = &self.ai.api_key {
            if key.expose_secret().chars().any(char::is_whitespace) {
                warn!("AI API key contains whitespace; requests will likely be rejected");
            }
        }

        Ok(())
    }

    /// Configured database path, or `lumina.db` in the platform data
    /// directory (created if needed).
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or(ConfigError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir).map_err(|source| ConfigError::Read {
            path: data_dir.to_path_buf(),
            source,
        })?;

        Ok(data_dir.join("lumina.db"))
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("lumina.toml"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "lumina", "luxe")
}
