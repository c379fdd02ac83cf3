use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use users::contract::model::UserIdentity;

/// Identity of a domain object. The id is server-generated at creation; the
/// namespace is the hosting tenant, never client-supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectIdentity {
    pub namespace: String,
    pub id: Uuid,
}

impl ObjectIdentity {
    pub fn new(namespace: impl Into<String>, id: Uuid) -> Self {
        Self {
            namespace: namespace.into(),
            id,
        }
    }
}

impl std::fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn in_bounds(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// The platform's core addressable entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainObject {
    pub identity: ObjectIdentity,
    pub object_type: String,
    pub alias: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: UserIdentity,
    pub location: Option<Location>,
    pub details: Map<String, Value>,
}

/// Creation draft. Identity and timestamp are server-assigned; `created_by`
/// is the creating caller.
#[derive(Debug, Clone)]
pub struct NewObject {
    pub object_type: String,
    pub alias: String,
    pub active: Option<bool>,
    pub location: Option<Location>,
    pub details: Map<String, Value>,
}

/// Partial update. Identity and creation timestamp are not patchable; a
/// client-supplied identity in the request body is ignored at the boundary.
#[derive(Debug, Clone, Default)]
pub struct ObjectPatch {
    pub object_type: Option<String>,
    pub alias: Option<String>,
    pub active: Option<bool>,
    pub location: Option<Location>,
    pub created_by: Option<UserIdentity>,
    pub details: Option<Map<String, Value>>,
}

/// Names (object type, alias) must be ASCII letters and spaces, with at
/// least one letter.
pub fn name_is_valid(value: &str) -> bool {
    !value.trim().is_empty() && value.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
}
