//! JSON bodies returned by `GET /api/generate`.
//!
//! Shared by the server (serialization) and [`crate::client`]
//! (deserialization), so both sides agree on one contract.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ProxyError;

/// Value of the `successful` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failed,
}

/// Envelope for completed and upstream-failed calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(rename = "Join")]
    pub join: String,
    pub response: Value,
    pub status: u16,
    pub successful: Outcome,
}

impl GenerateResponse {
    pub fn success(join: impl Into<String>, response: Value) -> Self {
        Self {
            join: join.into(),
            response,
            status: StatusCode::OK.as_u16(),
            successful: Outcome::Success,
        }
    }

    /// Failure envelope; `response` carries the error message as a string.
    pub fn failure(join: impl Into<String>, error: &ProxyError) -> Self {
        Self {
            join: join.into(),
            response: Value::String(error.to_string()),
            status: error.status_code().as_u16(),
            successful: Outcome::Failed,
        }
    }
}

/// Envelope for rejected input (no `Join`, no `response`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
    pub successful: Outcome,
}

impl From<&ProxyError> for ErrorResponse {
    fn from(error: &ProxyError) -> Self {
        Self {
            error: error.to_string(),
            status: error.status_code().as_u16(),
            successful: Outcome::Failed,
        }
    }
}

fn status_of(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for GenerateResponse {
    fn into_response(self) -> Response {
        (status_of(self.status), Json(self)).into_response()
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (status_of(self.status), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_success_serializes_with_capitalized_join() {
        let envelope = GenerateResponse::success("https://t.me/Playz_hacking", json!({"a": 1}));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "Join": "https://t.me/Playz_hacking",
                "response": {"a": 1},
                "status": 200,
                "successful": "success",
            })
        );
    }

    #[test]
    fn test_failure_carries_message_as_string() {
        let err = ProxyError::UpstreamStatus { status: 502 };
        let envelope = GenerateResponse::failure("join", &err);
        assert_eq!(envelope.response, json!("API returned 502"));
        assert_eq!(envelope.status, 500);
        assert_eq!(envelope.successful, Outcome::Failed);
    }

    #[test]
    fn test_error_response_for_missing_query() {
        let body = ErrorResponse::from(&ProxyError::MissingQuery);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "error": "Missing query parameter 'q'",
                "status": 400,
                "successful": "failed",
            })
        );
    }
}
