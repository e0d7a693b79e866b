//! Consistent Hash Ring Module
//!
//! Maps keys to peer identifiers with virtual-node replication.

// == Hash Function ==
/// Deterministic bytes -> u32 hash, substitutable for tests.
pub type HashFn = Box<dyn Fn(&[u8]) -> u32 + Send + Sync>;

// == Hash Ring ==
/// Consistent hash ring over a fixed peer set.
///
/// Each real peer contributes `replicas` virtual nodes; a small peer count
/// with a single position per peer distributes keys poorly, so replication
/// (typically 50-200) smooths it out at `O(peers * replicas)` memory and a
/// binary-search lookup. Position collisions between virtual nodes are
/// overwritten by whichever replica hashes last; that jitter is acceptable.
///
/// The ring is rebuilt wholesale when the peer set changes. `resolve` never
/// mutates, so concurrent lookups only need the owner to serialize rebuilds
/// against reads (`HttpPool` holds the ring behind its own lock).
pub struct HashRing {
    /// Virtual nodes per real peer
    replicas: usize,
    /// Hash function, crc32 by default
    hash: HashFn,
    /// Sorted ring positions
    keyring: Vec<u32>,
    /// Ring position -> owning peer, parallel lookup for `keyring`
    owners: std::collections::HashMap<u32, String>,
}

impl HashRing {
    // == Constructor ==
    /// Creates an empty ring; `hash` defaults to crc32 when `None`.
    pub fn new(replicas: usize, hash: Option<HashFn>) -> Self {
        Self {
            replicas,
            hash: hash.unwrap_or_else(|| Box::new(crc32fast::hash)),
            keyring: Vec::new(),
            owners: std::collections::HashMap::new(),
        }
    }

    // == Add ==
    /// Adds real peers, materializing `replicas` virtual nodes for each.
    ///
    /// Virtual node `i` of peer `p` lands at `hash("{i}{p}")`. The ring is
    /// re-sorted after every batch.
    pub fn add<S: AsRef<str>>(&mut self, peers: &[S]) {
        for peer in peers {
            let peer = peer.as_ref();
            for i in 0..self.replicas {
                let position = (self.hash)(format!("{i}{peer}").as_bytes());
                self.keyring.push(position);
                self.owners.insert(position, peer.to_string());
            }
        }
        self.keyring.sort_unstable();
    }

    // == Resolve ==
    /// Returns the peer owning `key`, or `None` on an empty ring.
    ///
    /// Picks the first ring position at or after `hash(key)`, wrapping
    /// around to the smallest position when the hash exceeds them all.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        if self.keyring.is_empty() {
            return None;
        }
        let hash = (self.hash)(key.as_bytes());
        let idx = self.keyring.partition_point(|&pos| pos < hash);
        let position = self.keyring[idx % self.keyring.len()];
        self.owners.get(&position).map(String::as_str)
    }

    /// Returns true if no peers have been added.
    pub fn is_empty(&self) -> bool {
        self.keyring.is_empty()
    }
}
