//! guardian-proxy HTTP server binary.
//!
//! Starts an axum HTTP server exposing the generate endpoint.
//!
//! # Environment Variables
//!
//! See [`guardian_proxy::config`]; additionally `RUST_LOG` sets the tracing
//! filter (default: "info,guardian_proxy=debug").
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use guardian_proxy::config::ProxyConfig;
use guardian_proxy::server::{app_router, AppState, GENERATE_PATH};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,guardian_proxy=debug".into()),
        )
        .init();

    let config = ProxyConfig::from_env()?;
    let bind_addr = config.bind_addr();

    tracing::info!(
        upstream = %config.upstream_url,
        timeout_secs = config.timeout.as_secs(),
        "Upstream configured"
    );

    let app = app_router(AppState::new(config)?);

    tracing::info!("guardian-proxy server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health  — liveness check");
    tracing::info!("  GET  {}?q=<message> — chat generate", GENERATE_PATH);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("guardian-proxy server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
