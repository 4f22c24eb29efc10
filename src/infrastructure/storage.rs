//! Key-value storage adapters.
//!
//! Provides a concurrent in-memory backend for the `KeyValue` port. Hosts
//! that persist to a browser origin store implement the same port on their
//! side of the boundary.

use crate::application::ports::KeyValue;
use dashmap::DashMap;
use std::sync::Arc;

/// Thread-safe in-memory key-value store backed by DashMap.
///
/// Used directly in tests, and as a staging backend for hosts that flush to
/// durable storage themselves.
#[derive(Debug, Default)]
pub struct MemoryKv {
    map: DashMap<String, String>,
}

impl MemoryKv {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove all keys.
    pub fn clear(&self) {
        self.map.clear();
    }
}

impl KeyValue for MemoryKv {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }
}

// Implement the port for Arc<MemoryKv> so tests can keep a handle to the
// store after handing it to a flow.
impl KeyValue for Arc<MemoryKv> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}
