use async_trait::async_trait;

use crate::contract::model::{DomainObject, ObjectIdentity};

/// Port for the domain layer: object records plus the parent→child edge set.
///
/// The graph is an edge set, not embedded adjacency arrays, so a binding is a
/// single insert and `children_of`/`parents_of` symmetry is structural.
#[async_trait]
pub trait ObjectsRepository: Send + Sync {
    /// Load an object by identity.
    async fn find(&self, identity: &ObjectIdentity) -> anyhow::Result<Option<DomainObject>>;
    /// Insert or replace a fully-formed object record.
    async fn save(&self, object: DomainObject) -> anyhow::Result<DomainObject>;
    /// Full scan. Ordering is unspecified.
    async fn find_all(&self) -> anyhow::Result<Vec<DomainObject>>;
    /// Insert a parent→child edge. Returns false if the edge already exists.
    async fn insert_edge(
        &self,
        parent: &ObjectIdentity,
        child: &ObjectIdentity,
    ) -> anyhow::Result<bool>;
    /// Identities of the children bound under `parent`.
    async fn children_of(&self, parent: &ObjectIdentity) -> anyhow::Result<Vec<ObjectIdentity>>;
    /// Identities of the parents `child` is bound under.
    async fn parents_of(&self, child: &ObjectIdentity) -> anyhow::Result<Vec<ObjectIdentity>>;
    /// Unconditional bulk delete of objects and edges.
    async fn delete_all(&self) -> anyhow::Result<()>;
}
