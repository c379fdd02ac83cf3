use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use users::contract::model::UserIdentity;

use crate::contract::model::{DomainObject, Location, ObjectIdentity};

/// Stored document shape. Identity fields are flattened into plain strings
/// the way the document store keys them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct ObjectRecord {
    pub namespace: String,
    pub id: String,
    pub object_type: String,
    pub alias: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by_namespace: String,
    pub created_by_email: String,
    pub location: Option<Location>,
    pub details: Map<String, Value>,
}

pub(crate) fn record_key(identity: &ObjectIdentity) -> String {
    let id = identity.id.to_string();
    docstore::composite_key([identity.namespace.as_str(), id.as_str()])
}

impl From<DomainObject> for ObjectRecord {
    fn from(object: DomainObject) -> Self {
        Self {
            namespace: object.identity.namespace,
            id: object.identity.id.to_string(),
            object_type: object.object_type,
            alias: object.alias,
            active: object.active,
            created_at: object.created_at,
            created_by_namespace: object.created_by.namespace,
            created_by_email: object.created_by.email,
            location: object.location,
            details: object.details,
        }
    }
}

impl TryFrom<ObjectRecord> for DomainObject {
    type Error = anyhow::Error;

    fn try_from(record: ObjectRecord) -> Result<Self> {
        let id = Uuid::parse_str(&record.id)
            .with_context(|| format!("corrupt object record: bad id '{}'", record.id))?;
        Ok(DomainObject {
            identity: ObjectIdentity::new(record.namespace, id),
            object_type: record.object_type,
            alias: record.alias,
            active: record.active,
            created_at: record.created_at,
            created_by: UserIdentity::new(record.created_by_namespace, record.created_by_email),
            location: record.location,
            details: record.details,
        })
    }
}
