use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use objects::contract::model::ObjectIdentity;
use users::contract::model::UserIdentity;

/// Identity of a persisted command invocation. The id is server-generated;
/// the mini-app name comes from the invocation path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandIdentity {
    pub namespace: String,
    pub mini_app: String,
    pub id: Uuid,
}

impl CommandIdentity {
    pub fn new(namespace: impl Into<String>, mini_app: impl Into<String>, id: Uuid) -> Self {
        Self {
            namespace: namespace.into(),
            mini_app: mini_app.into(),
            id,
        }
    }
}

impl std::fmt::Display for CommandIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.namespace, self.mini_app, self.id)
    }
}

/// A validated, persisted invocation record. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub identity: CommandIdentity,
    pub command_name: String,
    pub target: ObjectIdentity,
    pub invoked_at: DateTime<Utc>,
    pub invoked_by: UserIdentity,
    pub attributes: Map<String, Value>,
}

/// Invocation draft as it arrives from the boundary. Target and invoker are
/// optional here so their absence surfaces as a validation failure rather
/// than a deserialization error.
#[derive(Debug, Clone, Default)]
pub struct NewCommand {
    pub command_name: String,
    pub target: Option<ObjectIdentity>,
    pub invoked_by: Option<UserIdentity>,
    pub attributes: Map<String, Value>,
}

/// How the caller wants the handler run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Run the handler inline and return its result.
    Sync,
    /// Acknowledge immediately and run the handler in the background.
    FireAndContinue,
}
