//! LRU Cache Module
//!
//! Implements a bounded least-recently-used cache with size accounting.
//!
//! Keys are tracked in a VecDeque where:
//! - Front = Least recently used (next eviction candidate)
//! - Back = Most recently used

use std::collections::{HashMap, VecDeque};

// == Weight Trait ==
/// Anything storable in the cache must report its size in bytes.
pub trait Weight {
    fn weight(&self) -> usize;
}

/// Notification hook invoked with the affected key and value.
pub type Hook<V> = Box<dyn Fn(&str, &V) + Send>;

// == LRU Cache ==
/// Bounded key-value store with least-recently-used eviction.
///
/// Capacity is measured in bytes as `key.len() + value.weight()` per entry,
/// a deliberate approximation of memory cost. A `max_capacity` of zero means
/// unbounded: nothing is ever evicted.
///
/// Not synchronized; `ByteCache` wraps it in a mutex for concurrent use.
#[derive(Default)]
pub struct LruCache<V: Weight> {
    /// Key-value storage
    entries: HashMap<String, V>,
    /// Access order, front = oldest
    order: VecDeque<String>,
    /// Maximum capacity in bytes (0 = unbounded)
    max_capacity: usize,
    /// Sum of entry sizes currently resident
    used_capacity: usize,

    /// Invoked when a new key is inserted
    on_insert: Option<Hook<V>>,
    /// Invoked when an existing key is overwritten
    on_update: Option<Hook<V>>,
    /// Invoked once per evicted entry
    on_evict: Option<Hook<V>>,
}

impl<V: Weight> LruCache<V> {
    // == Constructor ==
    /// Creates a new empty cache with the given byte capacity.
    pub fn new(max_capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_capacity,
            used_capacity: 0,
            on_insert: None,
            on_update: None,
            on_evict: None,
        }
    }

    // == Get ==
    /// Looks up a key, promoting it to most-recently-used on a hit.
    ///
    /// A miss has no side effects.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        if !self.entries.contains_key(key) {
            return None;
        }
        self.touch(key);
        self.entries.get(key)
    }

    // == Add ==
    /// Inserts or updates an entry, then restores the capacity invariant.
    ///
    /// An update adjusts `used_capacity` by the value size delta and promotes
    /// the entry; an insert appends at the most-recently-used position. Either
    /// way, entries are then evicted oldest-first until `used_capacity` fits,
    /// one `on_evict` call per evicted entry. A single oversized add may evict
    /// several entries.
    ///
    /// Returns the number of entries evicted.
    pub fn add(&mut self, key: String, value: V) -> usize {
        if let Some(existing) = self.entries.get_mut(&key) {
            self.used_capacity = self.used_capacity - existing.weight() + value.weight();
            *existing = value;
            self.touch(&key);
            if let Some(hook) = &self.on_update {
                hook(&key, &self.entries[&key]);
            }
        } else {
            self.used_capacity += key.len() + value.weight();
            self.order.push_back(key.clone());
            self.entries.insert(key.clone(), value);
            if let Some(hook) = &self.on_insert {
                hook(&key, &self.entries[&key]);
            }
        }

        let mut evicted = 0;
        while self.max_capacity > 0 && self.used_capacity > self.max_capacity {
            if !self.remove_oldest() {
                break;
            }
            evicted += 1;
        }
        evicted
    }

    // == Remove Oldest ==
    /// Evicts the least-recently-used entry, invoking the evict hook.
    ///
    /// Returns false if the cache was empty.
    pub fn remove_oldest(&mut self) -> bool {
        let Some(key) = self.order.pop_front() else {
            return false;
        };
        if let Some(value) = self.entries.remove(&key) {
            self.used_capacity -= key.len() + value.weight();
            if let Some(hook) = &self.on_evict {
                hook(&key, &value);
            }
        }
        true
    }

    // == Hooks ==
    /// Sets the insert notification hook.
    pub fn set_insert_hook(&mut self, hook: Hook<V>) {
        self.on_insert = Some(hook);
    }

    /// Sets the update notification hook.
    pub fn set_update_hook(&mut self, hook: Hook<V>) {
        self.on_update = Some(hook);
    }

    /// Sets the eviction notification hook.
    pub fn set_evict_hook(&mut self, hook: Hook<V>) {
        self.on_evict = Some(hook);
    }

    // == Accessors ==
    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the bytes currently accounted for.
    pub fn used_capacity(&self) -> usize {
        self.used_capacity
    }

    /// Returns the configured byte capacity (0 = unbounded).
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    // == Touch ==
    /// Moves a resident key to the most-recently-used position.
    fn touch(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.order.push_back(key.to_string());
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::cache::ByteView;

    fn view(s: &str) -> ByteView {
        ByteView::new(s.as_bytes())
    }

    fn size(key: &str, value: &str) -> usize {
        key.len() + value.len()
    }

    #[test]
    fn test_get_hit_and_miss() {
        let mut cache = LruCache::new(0);
        cache.add("key1".to_string(), view("1234"));

        assert_eq!(cache.get("key1"), Some(&view("1234")));
        assert_eq!(cache.get("key2"), None);
    }

    #[test]
    fn test_add_updates_size_accounting() {
        let mut cache = LruCache::new(0);
        cache.add("k".to_string(), view("aa"));
        assert_eq!(cache.used_capacity(), 3);

        // Overwrite adjusts by value delta, key stays accounted once
        cache.add("k".to_string(), view("aaaa"));
        assert_eq!(cache.used_capacity(), 5);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k"), Some(&view("aaaa")));
    }

    #[test]
    fn test_eviction_removes_oldest() {
        let cap = size("key1", "value1") + size("key2", "value2");
        let mut cache = LruCache::new(cap);

        cache.add("key1".to_string(), view("value1"));
        cache.add("key2".to_string(), view("value2"));
        let evicted = cache.add("key3".to_string(), view("value3"));

        assert_eq!(evicted, 1);
        assert_eq!(cache.get("key1"), None);
        assert!(cache.get("key2").is_some());
        assert!(cache.get("key3").is_some());
        assert!(cache.used_capacity() <= cap);
    }

    #[test]
    fn test_get_protects_from_eviction() {
        // Capacity for exactly A and B
        let cap = size("a", "va") + size("b", "vb");
        let mut cache = LruCache::new(cap);

        cache.add("a".to_string(), view("va"));
        cache.add("b".to_string(), view("vb"));

        // Touch A so B becomes the eviction candidate
        assert!(cache.get("a").is_some());
        cache.add("c".to_string(), view("vc"));

        assert!(cache.get("a").is_some());
        assert_eq!(cache.get("b"), None);
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_one_add_can_evict_many() {
        let mut cache = LruCache::new(10);
        cache.add("a".to_string(), view("1"));
        cache.add("b".to_string(), view("1"));
        cache.add("c".to_string(), view("1"));

        // 1 + 9 = 10 bytes on its own: everything else must go
        let evicted = cache.add("z".to_string(), view("123456789"));

        assert_eq!(evicted, 3);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("z").is_some());
    }

    #[test]
    fn test_zero_capacity_never_evicts() {
        let mut cache = LruCache::new(0);
        for i in 0..1000 {
            cache.add(format!("key{i}"), view("value"));
        }
        assert_eq!(cache.len(), 1000);
    }

    #[test]
    fn test_evict_hook_fires_per_entry() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();

        let mut cache = LruCache::new(4);
        cache.set_evict_hook(Box::new(move |_, _| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        cache.add("a".to_string(), view("1"));
        cache.add("b".to_string(), view("1"));
        cache.add("c".to_string(), view("1"));

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_insert_and_update_hooks() {
        let inserts = Arc::new(AtomicUsize::new(0));
        let updates = Arc::new(AtomicUsize::new(0));

        let mut cache = LruCache::new(0);
        let i = inserts.clone();
        cache.set_insert_hook(Box::new(move |_, _| {
            i.fetch_add(1, Ordering::SeqCst);
        }));
        let u = updates.clone();
        cache.set_update_hook(Box::new(move |_, _| {
            u.fetch_add(1, Ordering::SeqCst);
        }));

        cache.add("k".to_string(), view("v1"));
        cache.add("k".to_string(), view("v2"));

        assert_eq!(inserts.load(Ordering::SeqCst), 1);
        assert_eq!(updates.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remove_oldest_on_empty() {
        let mut cache: LruCache<ByteView> = LruCache::new(8);
        assert!(!cache.remove_oldest());
    }
}
