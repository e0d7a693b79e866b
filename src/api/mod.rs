//! API Module
//!
//! HTTP handlers and routing for the cache server.
//!
//! # Endpoints
//! - `GET /cache/:group/:key` - Read-through get (public API)
//! - `GET /_swarm/:group/:key` - Peer protocol endpoint
//! - `GET /stats/:group` - Per-group cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
