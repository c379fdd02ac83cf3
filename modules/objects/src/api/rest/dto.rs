use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use users::contract::model::UserIdentity;

use crate::contract::model::{DomainObject, Location, NewObject, ObjectIdentity, ObjectPatch};

/// Wire shape of an object identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectIdDto {
    pub superapp: String,
    pub id: Uuid,
}

impl From<ObjectIdDto> for ObjectIdentity {
    fn from(dto: ObjectIdDto) -> Self {
        ObjectIdentity::new(dto.superapp, dto.id)
    }
}

impl From<ObjectIdentity> for ObjectIdDto {
    fn from(identity: ObjectIdentity) -> Self {
        Self {
            superapp: identity.namespace,
            id: identity.id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedByDto {
    pub user_id: UserIdDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdDto {
    pub superapp: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDto {
    pub object_id: ObjectIdDto,
    #[serde(rename = "type")]
    pub object_type: String,
    pub alias: String,
    pub active: bool,
    pub creation_timestamp: DateTime<Utc>,
    pub created_by: CreatedByDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub object_details: Map<String, Value>,
}

/// Creation request. Identity and timestamp fields are absent by design:
/// they are server-assigned and anything a client sent is dropped at the
/// deserialization boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateObjectReq {
    #[serde(rename = "type")]
    pub object_type: String,
    pub alias: String,
    pub active: Option<bool>,
    pub location: Option<Location>,
    pub object_details: Option<Map<String, Value>>,
}

/// Partial update request. No identity/timestamp fields: they are ignored,
/// not an error, when clients include them (unknown fields are dropped).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateObjectReq {
    #[serde(rename = "type")]
    pub object_type: Option<String>,
    pub alias: Option<String>,
    pub active: Option<bool>,
    pub location: Option<Location>,
    pub created_by: Option<CreatedByDto>,
    pub object_details: Option<Map<String, Value>>,
}

/// Caller identity carried as query parameters.
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

impl From<DomainObject> for ObjectDto {
    fn from(object: DomainObject) -> Self {
        Self {
            object_id: object.identity.into(),
            object_type: object.object_type,
            alias: object.alias,
            active: object.active,
            creation_timestamp: object.created_at,
            created_by: CreatedByDto {
                user_id: UserIdDto {
                    superapp: object.created_by.namespace,
                    email: object.created_by.email,
                },
            },
            location: object.location,
            object_details: object.details,
        }
    }
}

impl From<CreateObjectReq> for NewObject {
    fn from(req: CreateObjectReq) -> Self {
        Self {
            object_type: req.object_type,
            alias: req.alias,
            active: req.active,
            location: req.location,
            details: req.object_details.unwrap_or_default(),
        }
    }
}

impl From<UpdateObjectReq> for ObjectPatch {
    fn from(req: UpdateObjectReq) -> Self {
        Self {
            object_type: req.object_type,
            alias: req.alias,
            active: req.active,
            location: req.location,
            created_by: req
                .created_by
                .map(|c| UserIdentity::new(c.user_id.superapp, c.user_id.email)),
            details: req.object_details,
        }
    }
}
