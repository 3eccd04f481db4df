//! In-memory storage implementation
//!
//! This module provides a thread-safe, in-memory implementation of the KeyValueStore trait
//! using a HashMap protected by an async RwLock.

use crate::error::StorageError;
use crate::storage::KeyValueStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory key/value store
///
/// Clones share the same map, so a test can keep a handle to inspect what an
/// agent persisted.
///
/// # Examples
///
/// ```
/// use wayfarer::storage::{InMemoryStore, KeyValueStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///     store.set("greeting", "hello").await?;
///
///     assert_eq!(store.get("greeting").await?.as_deref(), Some("hello"));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the number of entries currently stored
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    async fn contains(&self, key: &str) -> Result<bool, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries.contains_key(key))
    }
}
