//! Core data models for translation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::core::errors::{Result, TranslationError};

/// Default target language
pub const DEFAULT_TARGET_LANG: &str = "zh";

/// Chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions seeded at the start of a conversation
    System,
    /// Text sent for translation
    User,
    /// Model reply
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Sampling parameters sent as `options`.
///
/// `temperature` and `top_p` are always present; anything else Ollama accepts
/// (`num_ctx`, `seed`, `stop`, ...) goes through `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub temperature: f64,
    pub top_p: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        // Low temperature keeps translations literal
        Self {
            temperature: 0.1,
            top_p: 0.9,
            extra: Map::new(),
        }
    }
}

impl GenerationOptions {
    /// Apply caller overrides. Only the named keys change.
    pub fn merge(&mut self, overrides: &Map<String, Value>) -> Result<()> {
        for (name, value) in overrides {
            match name.as_str() {
                "temperature" => self.temperature = numeric_option(name, value)?,
                "top_p" => self.top_p = numeric_option(name, value)?,
                _ => {
                    self.extra.insert(name.clone(), value.clone());
                }
            }
        }
        Ok(())
    }
}

fn numeric_option(name: &str, value: &Value) -> Result<f64> {
    value.as_f64().ok_or_else(|| TranslationError::InvalidOption {
        name: name.to_string(),
        message: format!("expected a number, got {}", value),
    })
}

/// Translation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Source text
    pub text: String,
    /// Target language, free-form (`zh`, `English`, ...)
    pub target_lang: String,
    /// Surrounding text used for disambiguation
    pub context: Option<String>,
    /// Conversation key; only honored when a session store is passed along
    pub session_id: Option<String>,
    /// Extra generation options merged over the defaults
    pub options: Map<String, Value>,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_lang: DEFAULT_TARGET_LANG.to_string(),
            context: None,
            session_id: None,
            options: Map::new(),
        }
    }

    pub fn with_target_lang(mut self, target_lang: impl Into<String>) -> Self {
        self.target_lang = target_lang.into();
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }
}

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub stream: bool,
    pub options: &'a GenerationOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_serialization() {
        let msg = ChatMessage::assistant("你好");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"role": "assistant", "content": "你好"})
        );
        assert_eq!(Role::System.to_string(), "system");
    }

    #[test]
    fn test_default_options() {
        let options = GenerationOptions::default();
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"temperature": 0.1, "top_p": 0.9})
        );
    }

    #[test]
    fn test_merge_overrides_only_named_keys() {
        let mut options = GenerationOptions::default();
        let overrides = json!({"temperature": 0.5, "num_ctx": 4096});
        options.merge(overrides.as_object().unwrap()).unwrap();

        assert_eq!(options.temperature, 0.5);
        assert_eq!(options.top_p, 0.9);
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"temperature": 0.5, "top_p": 0.9, "num_ctx": 4096})
        );
    }

    #[test]
    fn test_merge_rejects_non_numeric_temperature() {
        let mut options = GenerationOptions::default();
        let overrides = json!({"temperature": "hot"});
        let err = options.merge(overrides.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, TranslationError::InvalidOption { ref name, .. } if name == "temperature"));
        assert_eq!(options.temperature, 0.1);
    }

    #[test]
    fn test_request_builder() {
        let request = TranslationRequest::new("Hello")
            .with_target_lang("ja")
            .with_context("greeting")
            .with_session("user_123")
            .with_option("seed", 7);

        assert_eq!(request.target_lang, "ja");
        assert_eq!(request.context.as_deref(), Some("greeting"));
        assert_eq!(request.session_id.as_deref(), Some("user_123"));
        assert_eq!(request.options["seed"], json!(7));
        assert_eq!(TranslationRequest::new("x").target_lang, "zh");
    }
}
