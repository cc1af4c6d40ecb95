//! Axum route handlers for the guardian-proxy HTTP server.
//!
//! # Routes
//!
//! - `GET /health`       — Returns `{"status": "ok", "version": "...", "service": "guardian-proxy"}`
//! - `GET /api/generate` — Accepts `q`, returns the `Join`/`response` envelope

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::envelope::{ErrorResponse, GenerateResponse};
use crate::errors::ProxyError;
use crate::generate::GenerateService;
use crate::upstream::{ChatBackend, HttpBackend};

/// Path of the generate endpoint.
pub const GENERATE_PATH: &str = "/api/generate";

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Immutable runtime configuration.
    pub config: Arc<ProxyConfig>,
    /// Generate pipeline over the configured upstream backend.
    pub service: GenerateService,
}

impl AppState {
    /// State backed by the real HTTP upstream.
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let backend = HttpBackend::new(&config)?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    /// State over any [`ChatBackend`].
    pub fn with_backend(config: ProxyConfig, backend: Arc<dyn ChatBackend>) -> Self {
        let config = Arc::new(config);
        Self {
            service: GenerateService::new(config.clone(), backend),
            config,
        }
    }
}

/// Query string of the generate endpoint.
#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    pub q: Option<String>,
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(GENERATE_PATH, get(generate_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /health — liveness check.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "guardian-proxy",
    }))
}

/// GET /api/generate — forward `q` upstream and wrap the normalized reply.
///
/// An undecodable query string counts as a missing `q`, so the client
/// always gets a JSON envelope back.
async fn generate_handler(
    State(state): State<AppState>,
    params: Result<Query<GenerateParams>, QueryRejection>,
) -> Response {
    let query = match params {
        Ok(Query(params)) => params.q,
        Err(rejection) => {
            tracing::debug!("Rejected query string: {}", rejection);
            None
        }
    };

    match state.service.generate(query.as_deref()).await {
        Ok(value) => GenerateResponse::success(&state.config.join_url, value).into_response(),
        Err(err @ ProxyError::MissingQuery) => ErrorResponse::from(&err).into_response(),
        Err(err) => {
            tracing::warn!("Generate failed: {}", err);
            GenerateResponse::failure(&state.config.join_url, &err).into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
