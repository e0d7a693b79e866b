//! Response models for the cache server API
//!
//! Defines the DTOs used for serializing HTTP response bodies. Cache values
//! themselves travel as raw octet-stream bodies, not JSON.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
