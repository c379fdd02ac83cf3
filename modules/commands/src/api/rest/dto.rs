use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use objects::contract::model::ObjectIdentity;
use users::contract::model::UserIdentity;

use crate::contract::model::{Command, NewCommand};

/// Wire shape of a command identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandIdDto {
    pub superapp: String,
    pub miniapp: String,
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRefDto {
    pub superapp: String,
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetObjectDto {
    pub object_id: ObjectRefDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRefDto {
    pub superapp: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokedByDto {
    pub user_id: UserRefDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDto {
    pub command_id: CommandIdDto,
    pub command_name: String,
    pub target_object: TargetObjectDto,
    pub invocation_timestamp: DateTime<Utc>,
    pub invoked_by: InvokedByDto,
    pub command_attributes: Map<String, Value>,
}

/// Invocation request. Every part is optional on the wire so a missing or
/// incomplete piece becomes a domain validation failure, not a 422 from the
/// deserializer. Identity and timestamp fields are absent: they are
/// server-assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeCommandReq {
    pub command_name: Option<String>,
    pub target_object: Option<LooseTargetDto>,
    pub invoked_by: Option<LooseInvokerDto>,
    pub command_attributes: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LooseTargetDto {
    pub object_id: Option<LooseObjectRefDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LooseObjectRefDto {
    pub superapp: Option<String>,
    pub id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LooseInvokerDto {
    pub user_id: Option<LooseUserRefDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LooseUserRefDto {
    pub superapp: Option<String>,
    pub email: Option<String>,
}

/// Dispatch mode selector carried as a query parameter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvokeQuery {
    #[serde(rename = "async", default)]
    pub fire_and_continue: bool,
}

/// Caller identity for the admin surface.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerQuery {
    pub user_superapp: String,
    pub user_email: String,
}

impl From<CallerQuery> for UserIdentity {
    fn from(q: CallerQuery) -> Self {
        UserIdentity::new(q.user_superapp, q.user_email)
    }
}

impl From<InvokeCommandReq> for NewCommand {
    fn from(req: InvokeCommandReq) -> Self {
        let target = req
            .target_object
            .and_then(|t| t.object_id)
            .and_then(|o| match (o.superapp, o.id) {
                (Some(superapp), Some(id)) => Some(ObjectIdentity::new(superapp, id)),
                _ => None,
            });
        let invoked_by = req.invoked_by.and_then(|i| i.user_id).map(|u| {
            UserIdentity::new(u.superapp.unwrap_or_default(), u.email.unwrap_or_default())
        });
        Self {
            command_name: req.command_name.unwrap_or_default(),
            target,
            invoked_by,
            attributes: req.command_attributes.unwrap_or_default(),
        }
    }
}

impl From<Command> for CommandDto {
    fn from(command: Command) -> Self {
        Self {
            command_id: CommandIdDto {
                superapp: command.identity.namespace,
                miniapp: command.identity.mini_app,
                id: command.identity.id,
            },
            command_name: command.command_name,
            target_object: TargetObjectDto {
                object_id: ObjectRefDto {
                    superapp: command.target.namespace,
                    id: command.target.id,
                },
            },
            invocation_timestamp: command.invoked_at,
            invoked_by: InvokedByDto {
                user_id: UserRefDto {
                    superapp: command.invoked_by.namespace,
                    email: command.invoked_by.email,
                },
            },
            command_attributes: command.attributes,
        }
    }
}
