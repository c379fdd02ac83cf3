use thiserror::Error;

use crate::contract::model::Role;

/// Domain-specific errors for the user service.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {namespace}/{email}")]
    UserNotFound { namespace: String, email: String },

    #[error("User already exists: {namespace}/{email}")]
    UserAlreadyExists { namespace: String, email: String },

    #[error("Invalid {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Namespace '{namespace}' is not hosted here")]
    ForeignNamespace { namespace: String },

    #[error("Role {role} may not perform {operation}")]
    Unauthorized { role: Role, operation: &'static str },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn user_not_found(namespace: impl Into<String>, email: impl Into<String>) -> Self {
        Self::UserNotFound {
            namespace: namespace.into(),
            email: email.into(),
        }
    }

    pub fn user_already_exists(namespace: impl Into<String>, email: impl Into<String>) -> Self {
        Self::UserAlreadyExists {
            namespace: namespace.into(),
            email: email.into(),
        }
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn foreign_namespace(namespace: impl Into<String>) -> Self {
        Self::ForeignNamespace {
            namespace: namespace.into(),
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
