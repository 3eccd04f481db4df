//! Key/value storage backends
//!
//! This module provides a trait-based abstraction for the small string store
//! that holds conversation history and the API key between runs, with
//! in-memory and file-backed implementations.

use crate::error::StorageError;
use async_trait::async_trait;

pub mod file;
pub mod memory;

/// Entry holding the serialized message list
pub const MESSAGES_KEY: &str = "travelAIMessages";

/// Entry holding the API key
pub const API_KEY_KEY: &str = "geminiApiKey";

/// Trait for key/value storage backends
///
/// Values are opaque strings. There is no schema versioning: whatever was
/// written last is what `get` returns.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read an entry
    ///
    /// # Returns
    ///
    /// The stored value, None if the key is absent, or a storage error
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write an entry, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove an entry
    ///
    /// Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Check if an entry exists
    async fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get(key).await?.is_some())
    }
}

pub use file::FileStore;
pub use memory::InMemoryStore;
