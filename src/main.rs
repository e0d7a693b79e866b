//! SwarmCache - A distributed in-process read-through cache
//!
//! Runs one cache node: a group backed by a local dataset, wired into the
//! cluster given by the PEERS environment variable.

mod api;
mod cache;
mod cluster;
mod config;
mod error;
mod models;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use cache::{loader_fn, GroupRegistry};
use cluster::HttpPool;
use config::Config;
use error::CacheError;

/// Main entry point for the SwarmCache node.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the group registry and the demo "scores" group
/// 4. Build the HTTP peer pool from the configured peer list
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swarmcache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SwarmCache node");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, self_addr={}, peers={:?}, capacity={}B",
        config.server_port, config.self_addr, config.peers, config.cache_capacity
    );

    // Demo data source standing in for a real database
    let db: HashMap<&str, &str> =
        [("zhangsan", "100"), ("lisi", "200"), ("wangwu", "300")].into();

    let registry = Arc::new(GroupRegistry::new());
    let group = registry.create_group(
        "scores",
        config.cache_capacity,
        loader_fn(move |key| {
            info!(key, "loading from source dataset");
            db.get(key)
                .map(|v| v.as_bytes().to_vec())
                .ok_or_else(|| CacheError::NotFound(key.to_string()))
        }),
    );
    info!("Group registered: {}", group.name());

    // Wire the peer pool; with a single-entry peer list every key is local
    let pool = Arc::new(HttpPool::new(config.self_addr.clone()));
    pool.set_peers(&config.peers);
    group.register_peer_picker(pool);
    info!("Peer pool configured with {} peer(s)", config.peers.len());

    // Create router with all endpoints
    let app = create_router(AppState::new(registry));

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
