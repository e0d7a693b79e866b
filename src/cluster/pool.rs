//! HTTP Peer Pool Module
//!
//! Routes keys across the cluster with the hash ring and fetches remote
//! values over plain HTTP.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use crate::cluster::{HashRing, PeerFetcher, PeerPicker};
use crate::error::{CacheError, Result};

/// Path prefix of the peer protocol endpoint.
pub const PEER_BASE_PATH: &str = "/_swarm";

/// Virtual nodes per real peer.
pub const DEFAULT_REPLICAS: usize = 100;

// == Routing State ==
/// Ring and per-peer clients, swapped together under one lock so a lookup
/// never observes a half-rebuilt peer set.
struct Routes {
    ring: HashRing,
    fetchers: HashMap<String, Arc<dyn PeerFetcher>>,
}

// == HTTP Pool ==
/// Peer router for an HTTP cluster.
///
/// Owns a consistent hash ring over the configured peer base URLs and one
/// HTTP client per peer. The local process is identified by its own base
/// URL; keys the ring assigns to it resolve to no peer, which sends the
/// caller to its local loader.
pub struct HttpPool {
    /// This process's own base URL, e.g. "http://127.0.0.1:8001"
    self_addr: String,
    routes: Mutex<Routes>,
}

impl HttpPool {
    // == Constructor ==
    /// Creates a pool with an empty peer set.
    pub fn new(self_addr: impl Into<String>) -> Self {
        Self {
            self_addr: self_addr.into(),
            routes: Mutex::new(Routes {
                ring: HashRing::new(DEFAULT_REPLICAS, None),
                fetchers: HashMap::new(),
            }),
        }
    }

    // == Set Peers ==
    /// Replaces the peer set, rebuilding the ring and clients wholesale.
    ///
    /// There is no incremental add or remove of a single peer.
    pub fn set_peers<S: AsRef<str>>(&self, peers: &[S]) {
        let mut ring = HashRing::new(DEFAULT_REPLICAS, None);
        ring.add(peers);

        let mut fetchers: HashMap<String, Arc<dyn PeerFetcher>> = HashMap::new();
        for peer in peers {
            let peer = peer.as_ref();
            fetchers.insert(peer.to_string(), Arc::new(HttpFetcher::new(peer)));
        }

        let mut routes = self.routes.lock().unwrap();
        routes.ring = ring;
        routes.fetchers = fetchers;
    }
}

impl PeerPicker for HttpPool {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerFetcher>> {
        let routes = self.routes.lock().unwrap();
        let owner = routes.ring.resolve(key)?;
        if owner == self.self_addr {
            return None;
        }
        debug!(key, peer = owner, "routing key to remote peer");
        routes.fetchers.get(owner).cloned()
    }
}

// == HTTP Fetcher ==
/// HTTP client for one remote peer.
pub struct HttpFetcher {
    /// Peer base URL without trailing slash
    base_url: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a client for the peer at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PeerFetcher for HttpFetcher {
    async fn fetch(&self, group: &str, key: &str) -> Result<Vec<u8>> {
        let url = format!("{}{}/{}/{}", self.base_url, PEER_BASE_PATH, group, key);
        debug!(%url, "fetching from peer");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CacheError::Peer(format!("request to {url} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(CacheError::Peer(format!(
                "peer returned {} for {url}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CacheError::Peer(format!("reading body from {url}: {e}")))?;
        Ok(body.to_vec())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pool_picks_nobody() {
        let pool = HttpPool::new("http://127.0.0.1:8001");
        assert!(pool.pick_peer("key").is_none());
    }

    #[test]
    fn test_self_owned_keys_resolve_to_no_peer() {
        let addr = "http://127.0.0.1:8001";
        let pool = HttpPool::new(addr);
        pool.set_peers(&[addr]);

        // Single-peer ring: everything is self-owned
        for i in 0..50 {
            assert!(pool.pick_peer(&format!("key-{i}")).is_none());
        }
    }

    #[test]
    fn test_multi_peer_pool_routes_some_keys_remotely() {
        let pool = HttpPool::new("http://127.0.0.1:8001");
        pool.set_peers(&[
            "http://127.0.0.1:8001",
            "http://127.0.0.1:8002",
            "http://127.0.0.1:8003",
        ]);

        let remote = (0..300)
            .filter(|i| pool.pick_peer(&format!("key-{i}")).is_some())
            .count();

        // Roughly two thirds of keys belong to the other two peers
        assert!(remote > 100, "only {remote} of 300 keys routed remotely");
        assert!(remote < 300, "no keys left for the local process");
    }

    #[test]
    fn test_set_peers_replaces_the_ring() {
        let pool = HttpPool::new("http://127.0.0.1:8001");
        pool.set_peers(&["http://127.0.0.1:8001", "http://127.0.0.1:8002"]);
        pool.set_peers(&["http://127.0.0.1:8001"]);

        for i in 0..50 {
            assert!(pool.pick_peer(&format!("key-{i}")).is_none());
        }
    }
}
