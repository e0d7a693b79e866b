//! Property-Based Tests for the LRU Cache
//!
//! Uses proptest to verify the capacity and accounting invariants under
//! arbitrary operation sequences.

use proptest::prelude::*;

use crate::cache::{ByteView, LruCache};

// == Strategies ==
/// Generates short alphanumeric cache keys.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

/// Generates payloads of varied size.
fn value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Add { key: String, value: Vec<u8> },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Add { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // After any operation sequence, used capacity never exceeds the bound
    // and always equals the sum of resident entry sizes.
    #[test]
    fn prop_capacity_invariant(
        ops in prop::collection::vec(cache_op_strategy(), 1..100),
        capacity in 16usize..256,
    ) {
        let mut cache = LruCache::new(capacity);
        let mut shadow: std::collections::HashMap<String, usize> =
            std::collections::HashMap::new();

        for op in ops {
            match op {
                CacheOp::Add { key, value } => {
                    shadow.insert(key.clone(), value.len());
                    cache.add(key, ByteView::from(value));
                }
                CacheOp::Get { key } => {
                    let _ = cache.get(&key);
                }
            }
            prop_assert!(cache.used_capacity() <= capacity);
        }

        // Accounting matches what is actually resident: every shadow entry
        // the cache still holds contributes key + value bytes exactly once.
        let mut resident_total = 0;
        for (key, len) in &shadow {
            if cache.get(key).is_some() {
                resident_total += key.len() + len;
            }
        }
        prop_assert_eq!(cache.used_capacity(), resident_total);
    }

    // An unbounded cache never evicts, whatever is thrown at it.
    #[test]
    fn prop_unbounded_cache_keeps_everything(
        ops in prop::collection::vec(cache_op_strategy(), 1..100),
    ) {
        let mut cache = LruCache::new(0);
        let mut keys = std::collections::HashSet::new();

        for op in ops {
            match op {
                CacheOp::Add { key, value } => {
                    keys.insert(key.clone());
                    cache.add(key, ByteView::from(value));
                }
                CacheOp::Get { key } => {
                    let _ = cache.get(&key);
                }
            }
        }

        prop_assert_eq!(cache.len(), keys.len());
        for key in &keys {
            prop_assert!(cache.get(key).is_some());
        }
    }

    // A get always returns the most recently added value for the key.
    #[test]
    fn prop_get_returns_last_added(
        key in key_strategy(),
        values in prop::collection::vec(value_strategy(), 1..10),
    ) {
        let mut cache = LruCache::new(0);
        for value in &values {
            cache.add(key.clone(), ByteView::from(value.clone()));
        }

        let last = values.last().unwrap();
        prop_assert_eq!(cache.get(&key).unwrap().as_slice(), last.as_slice());
    }
}
