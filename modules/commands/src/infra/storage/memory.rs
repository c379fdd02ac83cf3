use async_trait::async_trait;

use docstore::{Collection, MemoryCollection};

use crate::contract::model::Command;
use crate::domain::repo::CommandsRepository;
use crate::infra::storage::record::{record_key, CommandRecord};

/// Gateway-backed repository over one document collection of command
/// records.
#[derive(Default)]
pub struct MemoryCommandsRepository {
    commands: MemoryCollection<CommandRecord>,
}

impl MemoryCommandsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommandsRepository for MemoryCommandsRepository {
    async fn save(&self, command: Command) -> anyhow::Result<Command> {
        let key = record_key(&command.identity);
        let record = self.commands.save(&key, CommandRecord::from(command)).await?;
        Command::try_from(record)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Command>> {
        self.commands
            .find_all()
            .await?
            .into_iter()
            .map(Command::try_from)
            .collect()
    }

    async fn find_for_mini_app(&self, mini_app: &str) -> anyhow::Result<Vec<Command>> {
        self.commands
            .find_all()
            .await?
            .into_iter()
            .filter(|record| record.mini_app == mini_app)
            .map(Command::try_from)
            .collect()
    }

    async fn delete_all(&self) -> anyhow::Result<()> {
        self.commands.delete_all().await
    }
}
