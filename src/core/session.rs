//! Caller-owned conversation history

use std::collections::HashMap;
use tracing::debug;

use crate::core::models::ChatMessage;

/// Conversation history keyed by session id.
///
/// The store is plain data and is not synchronized; wrap it in a mutex when
/// several tasks translate into the same store. A session only ever grows:
/// `[system]`, then one user and one assistant message per completed turn.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: HashMap<String, Vec<ChatMessage>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored messages of a session
    pub fn get(&self, session_id: &str) -> Option<&[ChatMessage]> {
        self.sessions.get(session_id).map(Vec::as_slice)
    }

    /// Whether the session exists
    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Number of sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no session
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Messages to send for the next turn: the stored history, or just the
    /// system prompt for an unseen session, followed by `user`.
    pub fn conversation(&self, session_id: &str, system_prompt: &str, user: &str) -> Vec<ChatMessage> {
        let mut messages = match self.get(session_id) {
            Some(history) if !history.is_empty() => history.to_vec(),
            _ => vec![ChatMessage::system(system_prompt)],
        };
        messages.push(ChatMessage::user(user));
        messages
    }

    /// Record a completed turn. The system prompt is only stored when the
    /// session is new; an existing session keeps its original one.
    pub fn append_turn(&mut self, session_id: &str, system_prompt: &str, user: &str, assistant: &str) {
        let history = self.sessions.entry(session_id.to_string()).or_default();
        if history.is_empty() {
            history.push(ChatMessage::system(system_prompt));
        }
        history.push(ChatMessage::user(user));
        history.push(ChatMessage::assistant(assistant));

        debug!("Session {} now has {} messages", session_id, history.len());
    }

    /// Drop a session. Unknown ids are ignored.
    pub fn clear(&mut self, session_id: &str) {
        if self.sessions.remove(session_id).is_some() {
            debug!("Cleared session {}", session_id);
        }
    }
}
