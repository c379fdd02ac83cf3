use thiserror::Error;
use uuid::Uuid;

use users::contract::model::Role;

/// Domain-specific errors for the object graph service.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Object not found: {namespace}/{id}")]
    ObjectNotFound { namespace: String, id: Uuid },

    #[error("An object cannot be bound to itself")]
    SelfBinding,

    #[error("Object {parent} already contains child {child}")]
    DuplicateBinding { parent: Uuid, child: Uuid },

    #[error("Invalid {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Caller not found: {namespace}/{email}")]
    UnknownCaller { namespace: String, email: String },

    #[error("Role {role} may not perform {operation}")]
    Unauthorized { role: Role, operation: &'static str },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn object_not_found(namespace: impl Into<String>, id: Uuid) -> Self {
        Self::ObjectNotFound {
            namespace: namespace.into(),
            id,
        }
    }

    pub fn duplicate_binding(parent: Uuid, child: Uuid) -> Self {
        Self::DuplicateBinding { parent, child }
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unknown_caller(namespace: impl Into<String>, email: impl Into<String>) -> Self {
        Self::UnknownCaller {
            namespace: namespace.into(),
            email: email.into(),
        }
    }

    pub fn unauthorized(role: Role, operation: &'static str) -> Self {
        Self::Unauthorized { role, operation }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
