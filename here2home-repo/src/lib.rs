//! # Here2Home Repository
//!
//! Concrete storage implementations (adapters) for the converter.
//! This crate provides the durable key-value stores that implement the
//! `KeyValueStore` port: SQLite for real deployments and an in-memory map
//! for tests and throwaway sessions.

use async_trait::async_trait;
use here2home_types::{KeyValueStore, StoreError};

pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
mod types;

#[cfg(feature = "sqlite")]
#[cfg(test)]
mod sqlite_tests;

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// URL selecting the in-memory store.
pub const MEMORY_URL: &str = "memory://";

/// Unified store wrapper over the available adapters.
pub enum Store {
    Memory(MemoryStore),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteStore),
}

/// Build and initialize a store from a database URL.
///
/// This function:
/// 1. Picks the adapter from the URL scheme
/// 2. Connects and runs migrations (SQLite)
/// 3. Returns a ready-to-use `Store`
///
/// # Examples
///
/// ```ignore
/// let store = build_store("sqlite://here2home.db?mode=rwc").await?;
/// let store = build_store("memory://").await?;
/// ```
pub async fn build_store(database_url: &str) -> anyhow::Result<Store> {
    if database_url == MEMORY_URL {
        tracing::warn!("Using in-memory store; cached rates will not survive a restart");
        return Ok(Store::Memory(MemoryStore::new()));
    }

    #[cfg(feature = "sqlite")]
    {
        if database_url.starts_with("sqlite:") {
            return Ok(Store::Sqlite(SqliteStore::new(database_url).await?));
        }
    }

    anyhow::bail!("Unsupported DATABASE_URL: {}", database_url)
}

// ─────────────────────────────────────────────────────────────────────────────
// Implement KeyValueStore for Store (delegation)
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl KeyValueStore for Store {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            Store::Memory(inner) => inner.get(key).await,
            #[cfg(feature = "sqlite")]
            Store::Sqlite(inner) => inner.get(key).await,
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            Store::Memory(inner) => inner.put(key, value).await,
            #[cfg(feature = "sqlite")]
            Store::Sqlite(inner) => inner.put(key, value).await,
        }
    }
}
