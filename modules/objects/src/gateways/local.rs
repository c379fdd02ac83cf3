use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::client::ObjectsApi;
use crate::contract::model::{DomainObject, ObjectIdentity};
use crate::domain::service::Service;

/// In-process implementation of [`ObjectsApi`] delegating to the domain
/// service.
pub struct ObjectsLocalClient {
    service: Arc<Service>,
}

impl ObjectsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ObjectsApi for ObjectsLocalClient {
    async fn find_object(
        &self,
        identity: &ObjectIdentity,
    ) -> anyhow::Result<Option<DomainObject>> {
        self.service
            .find_object(identity)
            .await
            .map_err(anyhow::Error::new)
    }
}
