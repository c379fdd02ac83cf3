use async_trait::async_trait;

use crate::contract::model::{User, UserIdentity};

/// Port for the domain layer: persistence operations the user service needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Load a user by identity.
    async fn find(&self, identity: &UserIdentity) -> anyhow::Result<Option<User>>;
    /// Insert or replace a fully-formed user record.
    ///
    /// The service computes identity/validation; the repo persists.
    async fn save(&self, user: User) -> anyhow::Result<User>;
    /// Full scan. Ordering is unspecified.
    async fn find_all(&self) -> anyhow::Result<Vec<User>>;
    /// Unconditional bulk delete.
    async fn delete_all(&self) -> anyhow::Result<()>;
}
