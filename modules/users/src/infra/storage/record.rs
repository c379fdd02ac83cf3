use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::contract::model::{Role, User, UserIdentity};

/// Stored document shape. Roles live as wire strings in the store, so a
/// record written by another platform component stays readable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct UserRecord {
    pub namespace: String,
    pub email: String,
    pub role: String,
    pub display_name: String,
    pub avatar_url: String,
}

pub(crate) fn record_key(identity: &UserIdentity) -> String {
    docstore::composite_key([identity.namespace.as_str(), identity.email.as_str()])
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        Self {
            namespace: user.identity.namespace,
            email: user.identity.email,
            role: user.role.as_str().to_string(),
            display_name: user.display_name,
            avatar_url: user.avatar_url,
        }
    }
}

impl TryFrom<UserRecord> for User {
    type Error = anyhow::Error;

    fn try_from(record: UserRecord) -> Result<Self> {
        let role = Role::parse(&record.role)
            .ok_or_else(|| anyhow!("corrupt user record: unknown role '{}'", record.role))?;
        Ok(User {
            identity: UserIdentity::new(record.namespace, record.email),
            role,
            display_name: record.display_name,
            avatar_url: record.avatar_url,
        })
    }
}
