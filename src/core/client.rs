//! Ollama chat client specialized for translation

use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::config::ClientConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{ChatMessage, ChatRequest, GenerationOptions, TranslationRequest};
use crate::core::prompt;
use crate::core::session::SessionStore;

/// Timeout for `GET /api/tags` when listing models
const LIST_MODELS_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for the health probe
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Translation client for a local Ollama service
#[derive(Debug, Clone)]
pub struct TranslationClient {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl TranslationClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let config = config.normalized();
        config.validate()?;

        // No idle connections are kept; every call dials the endpoint again.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Translate a single request.
    ///
    /// When the request names a session and `sessions` is given, the stored
    /// history is sent along and the turn is recorded once the reply arrives.
    /// A failed call never touches the store.
    pub async fn translate_text(
        &self,
        request: &TranslationRequest,
        sessions: Option<&mut SessionStore>,
    ) -> Result<String> {
        let system_prompt = prompt::system_prompt(&request.target_lang);
        let user_message = prompt::user_message(&request.text, request.context.as_deref());

        let session = match (request.session_id.as_deref(), sessions) {
            (Some(session_id), Some(store)) => Some((session_id, store)),
            _ => None,
        };

        let messages = match &session {
            Some((session_id, store)) => store.conversation(session_id, &system_prompt, &user_message),
            None => vec![
                ChatMessage::system(system_prompt.as_str()),
                ChatMessage::user(user_message.as_str()),
            ],
        };

        let mut options = GenerationOptions::default();
        options.merge(&request.options)?;

        let translated = match self.send_chat(&messages, &options).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!("Translation failed: {}", e);
                return Err(e);
            }
        };

        if let Some((session_id, store)) = session {
            store.append_turn(session_id, &system_prompt, &user_message, &translated);
        }

        info!(
            "Translated {} chars into {} ({} chars)",
            request.text.chars().count(),
            request.target_lang,
            translated.chars().count()
        );

        Ok(translated)
    }

    /// Forget a session's history
    pub fn clear_session(&self, session_id: &str, sessions: &mut SessionStore) {
        sessions.clear(session_id);
    }

    /// Names of the installed models, in server order
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.config.tags_url())
            .timeout(LIST_MODELS_TIMEOUT)
            .send()
            .await
            .map_err(TranslationError::from_transport)?;

        let json = Self::read_json(response).await?;

        let models = match json.get("models") {
            None | Some(Value::Null) => return Ok(vec![]),
            Some(models) => models.as_array().ok_or(TranslationError::UnexpectedFormatError)?,
        };

        let names = models
            .iter()
            .map(|model| {
                model["name"]
                    .as_str()
                    .map(str::to_string)
                    .ok_or(TranslationError::UnexpectedFormatError)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Ollama reports {} models", names.len());
        Ok(names)
    }

    /// Whether `/api/tags` answers 200. Never fails.
    pub async fn check_health(&self) -> bool {
        let result = self
            .client
            .get(self.config.tags_url())
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await;

        match result {
            Ok(response) => {
                let healthy = response.status() == StatusCode::OK;
                if !healthy {
                    warn!("Ollama health check returned {}", response.status());
                }
                healthy
            }
            Err(e) => {
                warn!("Ollama health check failed: {}", e);
                false
            }
        }
    }

    /// Send actual HTTP request
    async fn send_chat(&self, messages: &[ChatMessage], options: &GenerationOptions) -> Result<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages,
            stream: false,
            options,
        };

        let url = self.config.chat_url();
        debug!("POST {} ({} messages, model {})", url, messages.len(), self.config.model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(TranslationError::from_transport)?;

        let json = Self::read_json(response).await?;

        json["message"]["content"]
            .as_str()
            .map(|content| content.trim().to_string())
            .ok_or(TranslationError::UnexpectedFormatError)
    }

    /// Check the status, then decode the body
    async fn read_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranslationError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TranslationError::InvalidResponseError {
                message: e.to_string(),
            })
    }
}
