//! Durable key-value storage port.
//!
//! Adapters (SQLite, in-memory) implement this trait. Values are whole
//! serialized entries; a `put` replaces the previous value atomically.

use crate::error::StoreError;

#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the value stored under `key`.
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
