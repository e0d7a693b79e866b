//! SwarmCache - A distributed in-process read-through cache
//!
//! Each process holds a bounded LRU cache per named group. On a miss, a
//! consistent hash ring decides whether a peer owns the key; if so the
//! value is fetched over HTTP, otherwise a caller-supplied loader fills
//! the local cache. Concurrent misses for one key collapse into a single
//! load.

pub mod api;
pub mod cache;
pub mod cluster;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{loader_fn, ByteView, Group, GroupRegistry, Loader};
pub use cluster::HttpPool;
pub use config::Config;
pub use error::{CacheError, Result};
