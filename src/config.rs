//! Runtime configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `GUARDIAN_UPSTREAM_URL` — upstream chat endpoint
//! - `GUARDIAN_UPSTREAM_ORIGIN` — value for the `Origin`/`Referer` headers
//! - `GUARDIAN_TIMEOUT_SECS` — outbound call limit in seconds, above zero (default: 10)
//! - `GUARDIAN_JOIN_URL` — community link returned in every envelope
//! - `GUARDIAN_SYSTEM_PROMPT` — replaces the built-in persona prompt

use std::time::Duration;

use crate::errors::ConfigError;
use crate::prompt::DEFAULT_SYSTEM_PROMPT;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_UPSTREAM_URL: &str = "https://chat4.free2gpt.com/api/generate";
pub const DEFAULT_UPSTREAM_ORIGIN: &str = "https://chat4.free2gpt.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_JOIN_URL: &str = "https://t.me/Playz_hacking";

/// Proxy configuration. Immutable once the server starts.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Port the HTTP server binds on all interfaces.
    pub port: u16,
    /// Upstream chat-completion endpoint (POST).
    pub upstream_url: String,
    /// Site origin presented to upstream.
    pub upstream_origin: String,
    /// Hard limit on one outbound call.
    pub timeout: Duration,
    /// Community link echoed as `Join`.
    pub join_url: String,
    /// System message sent ahead of the user message.
    pub system_prompt: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upstream_url: DEFAULT_UPSTREAM_URL.into(),
            upstream_origin: DEFAULT_UPSTREAM_ORIGIN.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            join_url: DEFAULT_JOIN_URL.into(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
        }
    }
}

impl ProxyConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Unset or empty keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => parse_number("PORT", &raw)?,
            None => defaults.port,
        };
        let timeout = match get("GUARDIAN_TIMEOUT_SECS") {
            Some(raw) => match parse_number("GUARDIAN_TIMEOUT_SECS", &raw)? {
                0 => {
                    return Err(ConfigError::InvalidValue {
                        key: "GUARDIAN_TIMEOUT_SECS",
                        value: raw,
                        reason: "must be greater than zero".into(),
                    })
                }
                secs => Duration::from_secs(secs),
            },
            None => defaults.timeout,
        };

        Ok(Self {
            port,
            upstream_url: get("GUARDIAN_UPSTREAM_URL").unwrap_or(defaults.upstream_url),
            upstream_origin: get("GUARDIAN_UPSTREAM_ORIGIN").unwrap_or(defaults.upstream_origin),
            timeout,
            join_url: get("GUARDIAN_JOIN_URL").unwrap_or(defaults.join_url),
            system_prompt: get("GUARDIAN_SYSTEM_PROMPT").unwrap_or(defaults.system_prompt),
        })
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_number<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
