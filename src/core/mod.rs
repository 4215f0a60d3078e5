//! Ollama translation client

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod prompt;
pub mod session;
