//! Cache Module
//!
//! The in-process cache tier: bounded LRU storage, its concurrency guard,
//! per-key load deduplication, and the group orchestrator.

mod group;
mod lru;
mod singleflight;
mod stats;
mod store;
mod view;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use group::{loader_fn, Group, GroupRegistry, Loader, LoaderFn};
pub use lru::{Hook, LruCache, Weight};
pub use singleflight::SingleFlight;
pub use stats::CacheStats;
pub use store::ByteCache;
pub use view::ByteView;
