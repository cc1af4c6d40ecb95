//! In-memory chat transcript held by a client.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::envelope::GenerateResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
}

/// Ordered messages plus the latest community link seen.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<TranscriptMessage>,
    join_link: Option<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[TranscriptMessage] {
        &self.messages
    }

    /// Latest non-empty `Join` link, once one has been received.
    pub fn join_link(&self) -> Option<&str> {
        self.join_link.as_deref()
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &TranscriptMessage {
        self.push(Role::User, content.into())
    }

    /// Append the assistant reply carried by `reply` and remember its link.
    pub fn record_reply(&mut self, reply: &GenerateResponse) -> &TranscriptMessage {
        if !reply.join.is_empty() {
            self.join_link = Some(reply.join.clone());
        }
        self.push(Role::Assistant, render_response(&reply.response))
    }

    fn push(&mut self, role: Role, content: String) -> &TranscriptMessage {
        self.messages.push(TranscriptMessage {
            id: Uuid::new_v4().to_string(),
            role,
            content,
        });
        &self.messages[self.messages.len() - 1]
    }
}

/// Display text for a `response` value: strings verbatim, anything else
/// as pretty-printed JSON.
pub fn render_response(response: &Value) -> String {
    match response {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
