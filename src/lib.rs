//! # guardian-proxy
//!
//! A single-endpoint chat proxy. `GET /api/generate?q=...` signs the
//! message, forwards it to an upstream chat-completion service under a hard
//! timeout, and normalizes whatever comes back (plain text, OpenAI-style
//! `choices`, JSON serialized in strings, markdown-fenced JSON) into one
//! JSON envelope.
//!
//! ```text
//! q ─→ ChatRequest ─→ UpstreamRequest (sign, system prompt, user agent)
//!                      ─→ ChatBackend::send (bounded by the timeout)
//!                      ─→ normalize_body ─→ GenerateResponse
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod generate;
pub mod normalize;
pub mod prompt;
pub mod server;
pub mod upstream;

pub use config::ProxyConfig;
pub use envelope::{ErrorResponse, GenerateResponse, Outcome};
pub use errors::{ConfigError, ProxyError};
pub use generate::GenerateService;
pub use normalize::normalize_body;
pub use upstream::{ChatBackend, HttpBackend};

/// Crate version reported by `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
