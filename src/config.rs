//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// This process's own base URL, as it appears in the peer list
    pub self_addr: String,
    /// Base URLs of all cluster peers (including this process)
    pub peers: Vec<String>,
    /// Cache capacity in bytes per group (0 = unbounded)
    pub cache_capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8001)
    /// - `SELF_ADDR` - Own base URL (default: http://127.0.0.1:<port>)
    /// - `PEERS` - Comma-separated peer base URLs (default: just SELF_ADDR)
    /// - `CACHE_CAPACITY` - Per-group capacity in bytes (default: 1 MiB)
    pub fn from_env() -> Self {
        let server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8001);

        let self_addr = env::var("SELF_ADDR")
            .unwrap_or_else(|_| format!("http://127.0.0.1:{server_port}"));

        let peers = env::var("PEERS")
            .map(|v| {
                v.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| vec![self_addr.clone()]);

        Self {
            server_port,
            self_addr,
            peers,
            cache_capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024 * 1024),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8001,
            self_addr: "http://127.0.0.1:8001".to_string(),
            peers: vec!["http://127.0.0.1:8001".to_string()],
            cache_capacity: 1024 * 1024,
        }
    }
}
