//! Custom error types for translation operations

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Ollama answered with a non-success status
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Network error
    #[error("Request to Ollama API failed: {message}")]
    NetworkError {
        /// Underlying transport error
        message: String,
    },

    /// Response body could not be decoded as JSON
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// Decoder error
        message: String,
    },

    /// Response JSON lacks `message.content` (or `models` for the tag list)
    #[error("Unexpected response format")]
    UnexpectedFormatError,

    /// Request timeout
    #[error("Request timeout")]
    TimeoutError,

    /// Generation option with a value of the wrong type
    #[error("Invalid option `{name}`: {message}")]
    InvalidOption {
        /// Option key
        name: String,
        /// What was wrong with it
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Details
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TranslationError {
    /// Map a failed `send()` into the transport taxonomy
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TranslationError::TimeoutError
        } else {
            TranslationError::NetworkError {
                message: err.to_string(),
            }
        }
    }

    /// True for network failures, timeouts and non-success statuses
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            TranslationError::NetworkError { .. }
                | TranslationError::TimeoutError
                | TranslationError::ApiError { .. }
        )
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        let api = TranslationError::ApiError {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(api.is_transport());
        assert!(TranslationError::TimeoutError.is_transport());
        assert!(!TranslationError::UnexpectedFormatError.is_transport());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TranslationError::UnexpectedFormatError.to_string(),
            "Unexpected response format"
        );
        let err = TranslationError::ApiError {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 503 - unavailable");
    }
}
