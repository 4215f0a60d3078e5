//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::core::errors::{Result, TranslationError};

/// Default Ollama address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";

/// Default translation model
pub const DEFAULT_MODEL: &str = "huihui_ai/hunyuan-mt-abliterated:latest";

/// Default request timeout in seconds; translation can be slow on local hardware
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for the Ollama client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Endpoint root, without trailing slash
    pub base_url: String,
    /// Model identifier passed to `/api/chat`
    pub model: String,
    /// Timeout for translation requests
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Build a config from optional overrides.
    ///
    /// Each field falls back to its default independently. Empty strings and a
    /// zero timeout count as "not given".
    pub fn new(base_url: Option<String>, model: Option<String>, timeout_secs: Option<u64>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: base_url
                .filter(|url| !url.is_empty())
                .map(|url| trim_base_url(&url))
                .unwrap_or(defaults.base_url),
            model: model.filter(|m| !m.is_empty()).unwrap_or(defaults.model),
            timeout_secs: timeout_secs.filter(|t| *t > 0).unwrap_or(defaults.timeout_secs),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("OLLAMA_BASE_URL").ok();
        let model = std::env::var("OLLAMA_MODEL").ok();

        let timeout_secs = match std::env::var("OLLAMA_TIMEOUT_SECS") {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                TranslationError::ConfigError {
                    message: format!("OLLAMA_TIMEOUT_SECS `{}`: {}", raw, e),
                }
            })?),
            Err(_) => None,
        };

        let config = Self::new(base_url, model, timeout_secs);
        debug!("Loaded config from env: {:?}", config);
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config.normalized())
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(&base_url.into());
        self
    }

    /// Override the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Strip trailing slashes from the base URL
    pub fn normalized(mut self) -> Self {
        self.base_url = trim_base_url(&self.base_url);
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(TranslationError::ConfigError {
                message: "base_url is required".to_string(),
            });
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(TranslationError::ConfigError {
                message: format!("base_url must be http(s): {}", self.base_url),
            });
        }

        if self.model.is_empty() {
            return Err(TranslationError::ConfigError {
                message: "model is required".to_string(),
            });
        }

        if self.timeout_secs == 0 {
            return Err(TranslationError::ConfigError {
                message: "timeout_secs must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// `{base_url}/api/chat`
    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    /// `{base_url}/api/tags`
    pub fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
