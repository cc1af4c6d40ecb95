//! Upstream chat-completion service: request building and transport.

pub mod client;
pub mod request;

pub use client::{ChatBackend, HttpBackend};
pub use request::{sign, ChatMessage, ChatRequest, UpstreamPayload, UpstreamRequest};
