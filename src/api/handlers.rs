//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. The value read
//! path (public and peer protocol alike) returns the cache payload as a
//! raw octet-stream body, byte-for-byte.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::cache::GroupRegistry;
use crate::error::{CacheError, Result};
use crate::models::{HealthResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registry of cache groups served by this process
    pub registry: Arc<GroupRegistry>,
}

impl AppState {
    /// Creates a new AppState over the given registry.
    pub fn new(registry: Arc<GroupRegistry>) -> Self {
        Self { registry }
    }
}

/// Handler for GET /cache/:group/:key and GET /_swarm/:group/:key
///
/// Runs the read-through get for one key and writes the payload back as
/// application/octet-stream. Both the public API and the peer protocol use
/// the same semantics; only the path prefix differs.
pub async fn get_handler(
    State(state): State<AppState>,
    Path((group, key)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let group = state
        .registry
        .lookup(&group)
        .ok_or(CacheError::GroupNotFound(group))?;

    let view = group.get(&key).await?;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        view.to_vec(),
    ))
}

/// Handler for GET /stats/:group
///
/// Returns the group's cache statistics.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(group): Path<String>,
) -> Result<Json<StatsResponse>> {
    let group = state
        .registry
        .lookup(&group)
        .ok_or(CacheError::GroupNotFound(group))?;

    Ok(Json(StatsResponse::new(group.name(), &group.stats())))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
