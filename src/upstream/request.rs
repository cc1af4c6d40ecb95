//! Outbound request construction: validation, signing, message layout.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::ProxyError;
use crate::prompt::random_user_agent;

/// A validated incoming chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// The user's message, never empty.
    pub query: String,
    /// Epoch milliseconds at which the request was accepted.
    pub timestamp: i64,
}

impl ChatRequest {
    /// Validate the raw `q` parameter. Only an absent or empty query is
    /// rejected; whitespace is forwarded untouched.
    pub fn new(query: Option<&str>, timestamp: i64) -> Result<Self, ProxyError> {
        match query {
            Some(q) if !q.is_empty() => Ok(Self {
                query: q.to_string(),
                timestamp,
            }),
            _ => Err(ProxyError::MissingQuery),
        }
    }
}

/// One `{role, content}` entry in the upstream message list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// JSON body posted upstream.
///
/// `pass` is always sent as `null`; it is the empty trailing segment of
/// the signed string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamPayload {
    pub messages: Vec<ChatMessage>,
    pub time: i64,
    pub pass: Option<String>,
    pub sign: String,
}

/// Payload plus the per-call header decoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub payload: UpstreamPayload,
    pub user_agent: &'static str,
}

impl UpstreamRequest {
    /// Build the signed request for `chat`, with `system_prompt` ahead of
    /// the user's message and a freshly picked user agent.
    pub fn build(chat: &ChatRequest, system_prompt: &str) -> Self {
        Self {
            payload: UpstreamPayload {
                messages: vec![
                    ChatMessage::system(system_prompt),
                    ChatMessage::user(chat.query.as_str()),
                ],
                time: chat.timestamp,
                pass: None,
                sign: sign(chat.timestamp, &chat.query),
            },
            user_agent: random_user_agent(),
        }
    }
}

/// Lowercase hex SHA-256 of `"{timestamp}:{query}:"`.
pub fn sign(timestamp: i64, query: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{timestamp}:{query}:").as_bytes());
    hex::encode(hasher.finalize())
}
