//! Ollama Translator - conversational translation through a local Ollama model
//!
//! This library wraps Ollama's `/api/chat` endpoint with a translation prompt,
//! optional multi-turn session history, model listing and a health probe.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;

// Re-export key types for convenience
pub use self::core::{
    client::TranslationClient,
    config::ClientConfig,
    errors::{Result, TranslationError},
    models::{ChatMessage, GenerationOptions, Role, TranslationRequest},
    session::SessionStore,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
