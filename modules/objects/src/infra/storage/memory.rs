use async_trait::async_trait;
use dashmap::DashSet;

use docstore::{Collection, MemoryCollection};

use crate::contract::model::{DomainObject, ObjectIdentity};
use crate::domain::repo::ObjectsRepository;
use crate::infra::storage::record::{record_key, ObjectRecord};

/// Gateway-backed repository: one document collection for object records,
/// one concurrent set for parent→child edges. Edge insertion is atomic, so
/// duplicate detection needs no separate read.
#[derive(Default)]
pub struct MemoryObjectsRepository {
    objects: MemoryCollection<ObjectRecord>,
    edges: DashSet<(ObjectIdentity, ObjectIdentity)>,
}

impl MemoryObjectsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ObjectsRepository for MemoryObjectsRepository {
    async fn find(&self, identity: &ObjectIdentity) -> anyhow::Result<Option<DomainObject>> {
        match self.objects.find_by_id(&record_key(identity)).await? {
            Some(record) => Ok(Some(DomainObject::try_from(record)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, object: DomainObject) -> anyhow::Result<DomainObject> {
        let key = record_key(&object.identity);
        let record = self.objects.save(&key, ObjectRecord::from(object)).await?;
        DomainObject::try_from(record)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<DomainObject>> {
        self.objects
            .find_all()
            .await?
            .into_iter()
            .map(DomainObject::try_from)
            .collect()
    }

    async fn insert_edge(
        &self,
        parent: &ObjectIdentity,
        child: &ObjectIdentity,
    ) -> anyhow::Result<bool> {
        Ok(self.edges.insert((parent.clone(), child.clone())))
    }

    async fn children_of(&self, parent: &ObjectIdentity) -> anyhow::Result<Vec<ObjectIdentity>> {
        Ok(self
            .edges
            .iter()
            .filter(|edge| &edge.0 == parent)
            .map(|edge| edge.1.clone())
            .collect())
    }

    async fn parents_of(&self, child: &ObjectIdentity) -> anyhow::Result<Vec<ObjectIdentity>> {
        Ok(self
            .edges
            .iter()
            .filter(|edge| &edge.1 == child)
            .map(|edge| edge.0.clone())
            .collect())
    }

    async fn delete_all(&self) -> anyhow::Result<()> {
        self.objects.delete_all().await?;
        self.edges.clear();
        Ok(())
    }
}
