use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::contract::model::Command;

/// Failure modes a mini-app handler can report.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The mini-app does not know the invoked command name.
    #[error("Undefined command: {name}")]
    UnknownCommand { name: String },

    /// The command is known but execution failed.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl HandlerError {
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::UnknownCommand { name: name.into() }
    }
}

/// A mini-app's command executor. Implementations are black boxes registered
/// by mini-app name; the platform never inspects what they do.
#[async_trait]
pub trait MiniAppHandler: Send + Sync {
    async fn run_command(&self, command: &Command) -> Result<Value, HandlerError>;
}
