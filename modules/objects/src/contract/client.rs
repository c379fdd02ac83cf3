use async_trait::async_trait;

use crate::contract::model::{DomainObject, ObjectIdentity};

/// Public API trait for in-process consumers (the command dispatcher) that
/// need raw object lookups without the caller-facing policy filtering.
#[async_trait]
pub trait ObjectsApi: Send + Sync {
    async fn find_object(&self, identity: &ObjectIdentity)
        -> anyhow::Result<Option<DomainObject>>;
}
