//! Client for the generate endpoint.
//!
//! Mirrors what the browser front-end does: one `GET` per message, decode
//! the success envelope, surface a readable message on failure.

pub mod transcript;

use reqwest::header::ACCEPT;
use serde_json::Value;
use thiserror::Error;

use crate::envelope::GenerateResponse;
use crate::server::GENERATE_PATH;

pub use transcript::{Role, Transcript, TranscriptMessage};

/// Fallback message when a failed call carries no usable text.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to generate response";

/// Errors from [`GenerateClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure or an undecodable success body.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

/// HTTP client for `GET /api/generate`.
#[derive(Debug, Clone)]
pub struct GenerateClient {
    http: reqwest::Client,
    base_url: String,
}

impl GenerateClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Send one message and return the decoded success envelope.
    pub async fn generate(&self, message: &str) -> Result<GenerateResponse, ClientError> {
        let url = format!("{}{}", self.base_url, GENERATE_PATH);
        log::debug!("GenerateClient.generate: url={}, len={}", url, message.len());

        let response = self
            .http
            .get(&url)
            .query(&[("q", message)])
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message: failure_message(&text),
            });
        }

        Ok(response.json::<GenerateResponse>().await?)
    }
}

/// Pick the most useful text out of a failure body: `error`, then a string
/// `response`, then [`DEFAULT_FAILURE_MESSAGE`].
fn failure_message(body: &str) -> String {
    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    parsed
        .get("error")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            parsed
                .get("response")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or(DEFAULT_FAILURE_MESSAGE)
        .to_string()
}
