//! The generate pipeline: validate → build → call upstream under a
//! deadline → normalize.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::config::ProxyConfig;
use crate::errors::ProxyError;
use crate::normalize::normalize_body;
use crate::upstream::{ChatBackend, ChatRequest, UpstreamRequest};

/// Stateless per call; safe to share across concurrent requests.
#[derive(Clone)]
pub struct GenerateService {
    config: Arc<ProxyConfig>,
    backend: Arc<dyn ChatBackend>,
}

impl GenerateService {
    pub fn new(config: Arc<ProxyConfig>, backend: Arc<dyn ChatBackend>) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Run one call for the raw `q` parameter.
    ///
    /// Exactly one upstream call is made for a valid query and none for a
    /// missing one. A call that outlives `config.timeout` is dropped and
    /// reported as [`ProxyError::Timeout`].
    pub async fn generate(&self, query: Option<&str>) -> Result<Value, ProxyError> {
        let chat = ChatRequest::new(query, chrono::Utc::now().timestamp_millis())?;
        let request = UpstreamRequest::build(&chat, &self.config.system_prompt);

        tracing::debug!(
            query_len = chat.query.len() as u64,
            time = chat.timestamp,
            user_agent = request.user_agent,
            "Sending upstream request"
        );

        let started = Instant::now();
        let limit = self.config.timeout;
        let body = tokio::time::timeout(limit, self.backend.send(&request))
            .await
            .map_err(|_| ProxyError::Timeout { limit })??;

        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            body_len = body.len() as u64,
            "Upstream responded"
        );

        Ok(normalize_body(&body))
    }
}
