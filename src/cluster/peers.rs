//! Peer Capability Traits
//!
//! The two capabilities the cache core needs from a transport layer:
//! routing a key to a peer, and fetching a value from one.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

// == Peer Picker ==
/// Routes a key to the peer that owns it.
pub trait PeerPicker: Send + Sync {
    /// Returns a fetcher for the owning peer, or `None` when the key is
    /// owned by the local process (or no peer exists).
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerFetcher>>;
}

// == Peer Fetcher ==
/// Fetches a value for `(group, key)` from one remote peer.
///
/// The returned bytes are the exact cache payload, byte-for-byte; any
/// transport or status failure surfaces as an error.
#[async_trait]
pub trait PeerFetcher: Send + Sync {
    async fn fetch(&self, group: &str, key: &str) -> Result<Vec<u8>>;
}
