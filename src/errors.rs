//! Error types for the proxy.
//!
//! Normalization has no error type: every parse failure degrades to the
//! input text instead of surfacing.

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

/// Errors raised while serving a generate call.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The `q` query parameter is absent or empty.
    #[error("Missing query parameter 'q'")]
    MissingQuery,

    /// Upstream answered with a non-2xx status.
    #[error("API returned {status}")]
    UpstreamStatus { status: u16 },

    /// The upstream call could not be sent or its body could not be read.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// No complete upstream response arrived in time.
    #[error("Upstream request timed out after {limit:?}")]
    Timeout { limit: Duration },
}

impl ProxyError {
    /// HTTP status reported to the client for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingQuery => StatusCode::BAD_REQUEST,
            Self::UpstreamStatus { .. } | Self::Transport(_) | Self::Timeout { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Errors raised while loading [`crate::config::ProxyConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_query_message_matches_contract() {
        let err = ProxyError::MissingQuery;
        assert_eq!(err.to_string(), "Missing query parameter 'q'");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_failures_map_to_500() {
        let status = ProxyError::UpstreamStatus { status: 503 };
        assert_eq!(status.to_string(), "API returned 503");
        assert_eq!(status.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let timeout = ProxyError::Timeout {
            limit: Duration::from_secs(10),
        };
        assert_eq!(timeout.to_string(), "Upstream request timed out after 10s");
        assert_eq!(timeout.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_config_error_names_the_variable() {
        let err = ConfigError::InvalidValue {
            key: "PORT",
            value: "eighty".into(),
            reason: "invalid digit found in string".into(),
        };
        assert!(err.to_string().contains("PORT"));
        assert!(err.to_string().contains("eighty"));
    }
}
