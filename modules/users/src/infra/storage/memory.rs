use async_trait::async_trait;

use docstore::{Collection, MemoryCollection};

use crate::contract::model::{User, UserIdentity};
use crate::domain::repo::UsersRepository;
use crate::infra::storage::record::{record_key, UserRecord};

/// Gateway-backed repository over the in-memory document store.
#[derive(Default)]
pub struct MemoryUsersRepository {
    users: MemoryCollection<UserRecord>,
}

impl MemoryUsersRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UsersRepository for MemoryUsersRepository {
    async fn find(&self, identity: &UserIdentity) -> anyhow::Result<Option<User>> {
        match self.users.find_by_id(&record_key(identity)).await? {
            Some(record) => Ok(Some(User::try_from(record)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, user: User) -> anyhow::Result<User> {
        let key = record_key(&user.identity);
        let record = self.users.save(&key, UserRecord::from(user)).await?;
        User::try_from(record)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<User>> {
        self.users
            .find_all()
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn delete_all(&self) -> anyhow::Result<()> {
        self.users.delete_all().await
    }
}
