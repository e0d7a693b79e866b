//! Cluster Module
//!
//! Consistent-hash routing and the HTTP transport between peers.

mod peers;
mod pool;
mod ring;

// Re-export public types
pub use peers::{PeerFetcher, PeerPicker};
pub use pool::{HttpFetcher, HttpPool, DEFAULT_REPLICAS, PEER_BASE_PATH};
pub use ring::{HashFn, HashRing};
