//! Transport to the upstream chat-completion service.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT};

use super::request::UpstreamRequest;
use crate::config::ProxyConfig;
use crate::errors::ProxyError;

/// Sends one signed request upstream and returns the raw response body.
///
/// Implementations do not retry and do not enforce the overall deadline;
/// the caller bounds the call with its own timeout.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, request: &UpstreamRequest) -> Result<String, ProxyError>;
}

/// [`ChatBackend`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
    origin: String,
}

impl HttpBackend {
    /// Create a backend from config. The connection pool is shared by
    /// every request served through this backend.
    pub fn new(config: &ProxyConfig) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.upstream_url.clone(),
            origin: config.upstream_origin.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send(&self, request: &UpstreamRequest) -> Result<String, ProxyError> {
        log::debug!(
            "HttpBackend.send: endpoint={}, time={}, user_agent={}",
            self.endpoint,
            request.payload.time,
            request.user_agent,
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(USER_AGENT, request.user_agent)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json, text/plain, */*")
            .header(ORIGIN, self.origin.as_str())
            .header(REFERER, format!("{}/", self.origin))
            .json(&request.payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Upstream {} answered {}", self.endpoint, status);
            return Err(ProxyError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        log::debug!("Upstream {} answered {}", self.endpoint, status);
        Ok(response.text().await?)
    }
}
