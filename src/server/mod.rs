//! HTTP server for the chat proxy.
//!
//! # Endpoints
//!
//! - `GET /health`             — Liveness check
//! - `GET /api/generate?q=...` — Forward one message upstream and return
//!   the normalized reply

pub mod routes;

pub use routes::{app_router, AppState, GENERATE_PATH};
