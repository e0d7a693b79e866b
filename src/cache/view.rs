//! Byte View Module
//!
//! Defines the immutable byte payload stored in the cache.

use std::fmt;
use std::sync::Arc;

use crate::cache::lru::Weight;

// == Byte View ==
/// An immutable view over a cached byte payload.
///
/// Construction copies the caller's bytes and `to_vec` hands back a fresh
/// copy, so neither side can mutate what the cache holds. Cloning a view is
/// cheap (shared allocation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteView {
    data: Arc<[u8]>,
}

impl ByteView {
    // == Constructor ==
    /// Creates a view by copying the given bytes.
    pub fn new(data: &[u8]) -> Self {
        Self { data: data.into() }
    }

    // == Length ==
    /// Returns the payload length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // == Accessors ==
    /// Borrows the payload bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns an owned copy of the payload bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.to_vec()
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(data: Vec<u8>) -> Self {
        Self { data: data.into() }
    }
}

impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.data))
    }
}

impl Weight for ByteView {
    fn weight(&self) -> usize {
        self.data.len()
    }
}
