use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::client::UsersApi;
use crate::contract::model::User;
use crate::domain::service::Service;

/// In-process implementation of [`UsersApi`] that delegates to the domain
/// service. Other modules hold this behind `Arc<dyn UsersApi>`.
pub struct UsersLocalClient {
    service: Arc<Service>,
}

impl UsersLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UsersApi for UsersLocalClient {
    async fn find_user(&self, namespace: &str, email: &str) -> anyhow::Result<Option<User>> {
        self.service
            .find_user(namespace, email)
            .await
            .map_err(anyhow::Error::new)
    }
}
