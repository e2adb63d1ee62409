//! Caching Proxy - an HTTP forwarding layer with an embedded response cache

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use caching_proxy::{create_router, AppState, Config};

/// Main entry point for the caching proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Parse command-line configuration
/// 3. Create the cache and start its background cleanup task
/// 4. Build the catch-all proxy router
/// 5. Serve on the configured port until SIGINT/SIGTERM
/// 6. Stop the cleanup task deterministically on shutdown
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caching_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    info!(
        "starting caching proxy on port {} with origin {}",
        config.port, config.origin
    );
    info!(
        "cache configuration: default_ttl={}s, cleanup_interval={}s, capacity={}",
        config.default_ttl_secs, config.cleanup_interval_secs, config.capacity
    );

    let state = AppState::from_config(&config);
    let cache = Arc::clone(&state.cache);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("proxy listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // Stop the cleanup task before reporting shutdown complete
    cache.shutdown().await;
    info!("shutdown complete");

    Ok(())
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("received SIGTERM, initiating shutdown...");
        }
    }
}
