use async_trait::async_trait;

use crate::contract::model::User;

/// Public API trait other modules use to resolve a caller's identity to a
/// user record (and thereby a role). Deliberately narrow: consumers decide
/// what an absent user means in their own error taxonomy.
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn find_user(&self, namespace: &str, email: &str) -> anyhow::Result<Option<User>>;
}
