//! Byte Cache Module
//!
//! Wraps the LRU cache behind a mutex for concurrent use and keeps
//! per-group statistics.

use std::sync::Mutex;

use crate::cache::{ByteView, CacheStats, LruCache};

// == Guard State ==
struct Inner {
    /// Lazily initialized on first write; a get before that is a plain miss
    lru: Option<LruCache<ByteView>>,
    stats: CacheStats,
}

// == Byte Cache ==
/// Concurrency guard over the LRU cache.
///
/// Every operation holds an exclusive lock for its whole duration. There is
/// no reader-only path: a hit reorders the recency list, so even `get`
/// mutates state.
pub struct ByteCache {
    inner: Mutex<Inner>,
    capacity: usize,
}

impl ByteCache {
    // == Constructor ==
    /// Creates a guard for a cache of the given byte capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                lru: None,
                stats: CacheStats::new(),
            }),
            capacity,
        }
    }

    // == Get ==
    /// Looks up a key, cloning the view out of the cache on a hit.
    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut inner = self.inner.lock().unwrap();
        let hit = inner
            .lru
            .as_mut()
            .and_then(|lru| lru.get(key).cloned());
        match hit {
            Some(view) => {
                inner.stats.record_hit();
                Some(view)
            }
            None => {
                inner.stats.record_miss();
                None
            }
        }
    }

    // == Add ==
    /// Inserts or updates an entry, evicting as needed.
    pub fn add(&self, key: String, value: ByteView) {
        let mut inner = self.inner.lock().unwrap();
        if inner.lru.is_none() {
            inner.lru = Some(LruCache::new(self.capacity));
        }
        let evicted = inner
            .lru
            .as_mut()
            .map(|lru| lru.add(key, value))
            .unwrap_or(0);
        inner.stats.record_evictions(evicted as u64);
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock().unwrap();
        let mut stats = inner.stats.clone();
        if let Some(lru) = &inner.lru {
            stats.entries = lru.len();
            stats.used_capacity = lru.used_capacity();
        }
        stats.max_capacity = self.capacity;
        stats
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_before_first_write_is_a_miss() {
        let cache = ByteCache::new(1024);
        assert_eq!(cache.get("anything"), None);

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 0);
    }

    #[test]
    fn test_add_then_get() {
        let cache = ByteCache::new(1024);
        cache.add("key1".to_string(), ByteView::new(b"value1"));

        let hit = cache.get("key1").unwrap();
        assert_eq!(hit.as_slice(), b"value1");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.used_capacity, "key1".len() + "value1".len());
    }

    #[test]
    fn test_stats_track_evictions() {
        let cache = ByteCache::new(10);
        cache.add("a".to_string(), ByteView::new(b"12345"));
        cache.add("b".to_string(), ByteView::new(b"12345"));

        let stats = cache.stats();
        assert_eq!(stats.evictions, 1);
        assert!(stats.used_capacity <= 10);
    }

    #[test]
    fn test_concurrent_access() {
        use std::sync::Arc;
        use std::thread;

        let cache = Arc::new(ByteCache::new(0));
        let mut handles = Vec::new();
        for t in 0..8 {
            let cache = cache.clone();
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    let key = format!("key-{t}-{i}");
                    cache.add(key.clone(), ByteView::new(b"v"));
                    assert!(cache.get(&key).is_some());
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.stats().entries, 800);
    }
}
