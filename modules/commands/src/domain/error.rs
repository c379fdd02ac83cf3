use thiserror::Error;
use uuid::Uuid;

use users::contract::model::Role;

/// Domain-specific errors for command invocation.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Unknown invoker: {namespace}/{email}")]
    UnknownInvoker { namespace: String, email: String },

    #[error("Role {role} may not perform {operation}")]
    Unauthorized { role: Role, operation: &'static str },

    #[error("Target object not found: {namespace}/{id}")]
    TargetNotFound { namespace: String, id: Uuid },

    #[error("Target object is inactive: {namespace}/{id}")]
    InactiveTarget { namespace: String, id: Uuid },

    #[error("Mini-app '{mini_app}' has no command '{name}'")]
    UndefinedCommand { mini_app: String, name: String },

    #[error("Mini-app '{mini_app}' failed: {message}")]
    HandlerFailed { mini_app: String, message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unknown_invoker(namespace: impl Into<String>, email: impl Into<String>) -> Self {
        Self::UnknownInvoker {
            namespace: namespace.into(),
            email: email.into(),
        }
    }

    pub fn unauthorized(role: Role, operation: &'static str) -> Self {
        Self::Unauthorized { role, operation }
    }

    pub fn target_not_found(namespace: impl Into<String>, id: Uuid) -> Self {
        Self::TargetNotFound {
            namespace: namespace.into(),
            id,
        }
    }

    pub fn inactive_target(namespace: impl Into<String>, id: Uuid) -> Self {
        Self::InactiveTarget {
            namespace: namespace.into(),
            id,
        }
    }

    pub fn undefined_command(mini_app: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UndefinedCommand {
            mini_app: mini_app.into(),
            name: name.into(),
        }
    }

    pub fn handler_failed(mini_app: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HandlerFailed {
            mini_app: mini_app.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
