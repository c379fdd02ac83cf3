use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use objects::contract::model::ObjectIdentity;
use users::contract::model::UserIdentity;

use crate::contract::model::{Command, CommandIdentity};

/// Stored document shape. Identity fields are flattened into plain strings
/// the way the document store keys them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct CommandRecord {
    pub namespace: String,
    pub mini_app: String,
    pub id: String,
    pub command_name: String,
    pub target_namespace: String,
    pub target_id: String,
    pub invoked_at: DateTime<Utc>,
    pub invoked_by_namespace: String,
    pub invoked_by_email: String,
    pub attributes: Map<String, Value>,
}

pub(crate) fn record_key(identity: &CommandIdentity) -> String {
    let id = identity.id.to_string();
    docstore::composite_key([
        identity.namespace.as_str(),
        identity.mini_app.as_str(),
        id.as_str(),
    ])
}

impl From<Command> for CommandRecord {
    fn from(command: Command) -> Self {
        Self {
            namespace: command.identity.namespace,
            mini_app: command.identity.mini_app,
            id: command.identity.id.to_string(),
            command_name: command.command_name,
            target_namespace: command.target.namespace,
            target_id: command.target.id.to_string(),
            invoked_at: command.invoked_at,
            invoked_by_namespace: command.invoked_by.namespace,
            invoked_by_email: command.invoked_by.email,
            attributes: command.attributes,
        }
    }
}

impl TryFrom<CommandRecord> for Command {
    type Error = anyhow::Error;

    fn try_from(record: CommandRecord) -> Result<Self> {
        let id = Uuid::parse_str(&record.id)
            .with_context(|| format!("corrupt command record: bad id '{}'", record.id))?;
        let target_id = Uuid::parse_str(&record.target_id).with_context(|| {
            format!("corrupt command record: bad target id '{}'", record.target_id)
        })?;
        Ok(Command {
            identity: CommandIdentity::new(record.namespace, record.mini_app, id),
            command_name: record.command_name,
            target: ObjectIdentity::new(record.target_namespace, target_id),
            invoked_at: record.invoked_at,
            invoked_by: UserIdentity::new(record.invoked_by_namespace, record.invoked_by_email),
            attributes: record.attributes,
        })
    }
}
