//! Persistence gateway for the SuperApp platform.
//!
//! The platform treats its store as an external collaborator: a set of keyed
//! document collections with per-key atomic writes. Module repositories are
//! defined as domain ports and implemented over [`Collection`]; the shipped
//! backend is the in-memory [`MemoryCollection`].

mod key;
mod memory;

pub use key::{composite_key, KEY_DELIMITER};
pub use memory::MemoryCollection;

use async_trait::async_trait;

/// A keyed document collection.
///
/// Keys are composite strings built with [`composite_key`]. Individual writes
/// are atomic per key; concurrent writers to the same key are last-write-wins.
/// Nothing above this port caches records across requests.
#[async_trait]
pub trait Collection<T>: Send + Sync
where
    T: Clone + Send + Sync + 'static,
{
    /// Load a record by its composite key.
    async fn find_by_id(&self, key: &str) -> anyhow::Result<Option<T>>;

    /// Insert or replace the record stored under `key`.
    async fn save(&self, key: &str, record: T) -> anyhow::Result<T>;

    /// Full scan. Ordering is unspecified.
    async fn find_all(&self) -> anyhow::Result<Vec<T>>;

    /// Delete by key. Returns true if a record was removed.
    async fn delete_by_id(&self, key: &str) -> anyhow::Result<bool>;

    /// Unconditional bulk delete.
    async fn delete_all(&self) -> anyhow::Result<()>;
}
