use async_trait::async_trait;

use crate::contract::model::Command;

/// Port for the domain layer: the append-style command history.
#[async_trait]
pub trait CommandsRepository: Send + Sync {
    /// Persist an invocation record.
    async fn save(&self, command: Command) -> anyhow::Result<Command>;
    /// Full scan. Ordering is unspecified.
    async fn find_all(&self) -> anyhow::Result<Vec<Command>>;
    /// All invocations recorded against one mini-app.
    async fn find_for_mini_app(&self, mini_app: &str) -> anyhow::Result<Vec<Command>>;
    /// Unconditional bulk delete.
    async fn delete_all(&self) -> anyhow::Result<()>;
}
