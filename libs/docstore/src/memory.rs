use async_trait::async_trait;
use dashmap::DashMap;

use crate::Collection;

/// DashMap-backed collection. Per-key operations are atomic; a full scan
/// observes a point-in-time-ish view with unspecified ordering.
#[derive(Debug, Default)]
pub struct MemoryCollection<T> {
    records: DashMap<String, T>,
}

impl<T> MemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl<T> Collection<T> for MemoryCollection<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn find_by_id(&self, key: &str) -> anyhow::Result<Option<T>> {
        Ok(self.records.get(key).map(|r| r.value().clone()))
    }

    async fn save(&self, key: &str, record: T) -> anyhow::Result<T> {
        self.records.insert(key.to_owned(), record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<T>> {
        Ok(self.records.iter().map(|r| r.value().clone()).collect())
    }

    async fn delete_by_id(&self, key: &str) -> anyhow::Result<bool> {
        Ok(self.records.remove(key).is_some())
    }

    async fn delete_all(&self) -> anyhow::Result<()> {
        self.records.clear();
        Ok(())
    }
}
