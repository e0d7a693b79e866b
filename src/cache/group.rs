//! Group Module
//!
//! The per-namespace read path: local cache, deduplicated load, remote
//! peer, local loader fallback, cache fill.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::cache::{ByteCache, ByteView, CacheStats, SingleFlight};
use crate::cluster::{PeerFetcher, PeerPicker};
use crate::error::{CacheError, Result};

// == Loader Capability ==
/// Produces the value for a key found nowhere in the cache tier.
///
/// Supplied once at group creation, e.g. backed by a database. May be
/// invoked concurrently for different keys and must be safe for that.
#[async_trait]
pub trait Loader: Send + Sync {
    async fn load(&self, key: &str) -> Result<Vec<u8>>;
}

/// Adapter letting a plain closure act as a [`Loader`].
pub struct LoaderFn<F>(F);

#[async_trait]
impl<F> Loader for LoaderFn<F>
where
    F: Fn(&str) -> Result<Vec<u8>> + Send + Sync,
{
    async fn load(&self, key: &str) -> Result<Vec<u8>> {
        (self.0)(key)
    }
}

/// Wraps `f` as a [`Loader`].
pub fn loader_fn<F>(f: F) -> LoaderFn<F>
where
    F: Fn(&str) -> Result<Vec<u8>> + Send + Sync,
{
    LoaderFn(f)
}

// == Group ==
/// A named, capacity-bounded cache namespace with its own loader.
///
/// Without a registered peer picker a group is a purely local cache.
pub struct Group {
    name: String,
    loader: Box<dyn Loader>,
    main_cache: ByteCache,
    flight: SingleFlight,
    peer_picker: OnceLock<Arc<dyn PeerPicker>>,
}

impl Group {
    fn new(name: impl Into<String>, capacity: usize, loader: Box<dyn Loader>) -> Self {
        Self {
            name: name.into(),
            loader,
            main_cache: ByteCache::new(capacity),
            flight: SingleFlight::new(),
            peer_picker: OnceLock::new(),
        }
    }

    /// Returns the group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a snapshot of the group's cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.main_cache.stats()
    }

    // == Peer Registration ==
    /// Binds the peer picker. One-shot: a second call is a programming
    /// error and panics.
    pub fn register_peer_picker(&self, picker: Arc<dyn PeerPicker>) {
        if self.peer_picker.set(picker).is_err() {
            panic!("register_peer_picker called more than once");
        }
    }

    // == Get ==
    /// The read path: cache hit, or one deduplicated load per key.
    ///
    /// Concurrent misses for the same key converge on a single load whose
    /// outcome every caller observes.
    pub async fn get(&self, key: &str) -> Result<ByteView> {
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }

        if let Some(view) = self.main_cache.get(key) {
            debug!(group = %self.name, key, "cache hit");
            return Ok(view);
        }
        debug!(group = %self.name, key, "cache miss");

        self.flight.run(key, || self.load(key)).await
    }

    // == Load ==
    /// Tries the owning remote peer first, then the local loader.
    ///
    /// Any peer failure is swallowed here: a partitioned cluster degrades
    /// to single-node behavior instead of failing the request.
    async fn load(&self, key: &str) -> Result<ByteView> {
        if let Some(picker) = self.peer_picker.get() {
            if let Some(peer) = picker.pick_peer(key) {
                match self.fetch_from_peer(peer.as_ref(), key).await {
                    Ok(view) => {
                        debug!(group = %self.name, key, "loaded from peer");
                        return Ok(view);
                    }
                    Err(err) => {
                        warn!(group = %self.name, key, %err, "peer fetch failed, falling back to local loader");
                    }
                }
            }
        }
        self.load_locally(key).await
    }

    /// Invokes the caller-supplied loader and fills the local cache.
    async fn load_locally(&self, key: &str) -> Result<ByteView> {
        let bytes = self.loader.load(key).await?;
        let view = ByteView::from(bytes);
        self.main_cache.add(key.to_string(), view.clone());
        Ok(view)
    }

    /// Fetches from a remote peer. The remote peer owns the cached copy of
    /// this key; the value is deliberately not stored locally.
    async fn fetch_from_peer(&self, peer: &dyn PeerFetcher, key: &str) -> Result<ByteView> {
        let bytes = peer.fetch(&self.name, key).await?;
        Ok(ByteView::from(bytes))
    }
}

// == Group Registry ==
/// Explicit registry of groups by name, owned by the host process.
#[derive(Default)]
pub struct GroupRegistry {
    groups: RwLock<HashMap<String, Arc<Group>>>,
}

impl GroupRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a group and registers it under `name`.
    ///
    /// Re-registering a name replaces the old group (last writer wins).
    pub fn create_group(
        &self,
        name: impl Into<String>,
        capacity: usize,
        loader: impl Loader + 'static,
    ) -> Arc<Group> {
        let name = name.into();
        let group = Arc::new(Group::new(name.clone(), capacity, Box::new(loader)));
        self.groups
            .write()
            .unwrap()
            .insert(name, group.clone());
        group
    }

    /// Looks up a group by name.
    pub fn lookup(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.read().unwrap().get(name).cloned()
    }
}
