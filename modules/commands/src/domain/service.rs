use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use objects::contract::client::ObjectsApi;
use users::contract::client::UsersApi;
use users::contract::model::{email_is_valid, Role, UserIdentity};
use users::contract::policy::{AccessPolicy, Capability};

use crate::contract::handler::HandlerError;
use crate::contract::model::{Command, CommandIdentity, DispatchMode, NewCommand};
use crate::domain::dispatcher::Dispatcher;
use crate::domain::error::DomainError;
use crate::domain::registry::HandlerRegistry;
use crate::domain::repo::CommandsRepository;

/// What an invocation produced.
#[derive(Debug)]
pub enum Invocation {
    /// The command was persisted but no handler ran (unregistered mini-app)
    /// or the handler runs in the background. The record itself is the
    /// acknowledgment.
    Acknowledged(Command),
    /// A registered handler ran inline and returned this value.
    Completed(Value),
}

/// Domain service owning command validation, persistence, and dispatch.
pub struct Service {
    repo: Arc<dyn CommandsRepository>,
    users: Arc<dyn UsersApi>,
    objects: Arc<dyn ObjectsApi>,
    registry: Arc<HandlerRegistry>,
    dispatcher: Arc<Dispatcher>,
    policy: Arc<dyn AccessPolicy>,
    namespace: String,
}

impl Service {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        repo: Arc<dyn CommandsRepository>,
        users: Arc<dyn UsersApi>,
        objects: Arc<dyn ObjectsApi>,
        registry: Arc<HandlerRegistry>,
        dispatcher: Arc<Dispatcher>,
        policy: Arc<dyn AccessPolicy>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            users,
            objects,
            registry,
            dispatcher,
            policy,
            namespace: namespace.into(),
        }
    }

    /// Validate, persist, and dispatch one invocation. Validation fails fast
    /// in a fixed order so each malformed draft yields one distinct failure.
    #[instrument(
        name = "commands.service.invoke",
        skip(self, draft),
        fields(command = %draft.command_name)
    )]
    pub async fn invoke(
        &self,
        mini_app: &str,
        draft: NewCommand,
        mode: DispatchMode,
    ) -> Result<Invocation, DomainError> {
        info!("Invoking mini-app command");

        let target = draft
            .target
            .ok_or_else(|| DomainError::invalid_field("targetObject", "is required"))?;
        let invoker = draft
            .invoked_by
            .ok_or_else(|| DomainError::invalid_field("invokedBy", "is required"))?;

        if draft.command_name.trim().is_empty() {
            return Err(DomainError::invalid_field("command", "must not be blank"));
        }
        if target.namespace.trim().is_empty() {
            return Err(DomainError::invalid_field(
                "targetObject.superapp",
                "must not be blank",
            ));
        }
        if invoker.namespace.trim().is_empty() {
            return Err(DomainError::invalid_field(
                "invokedBy.superapp",
                "must not be blank",
            ));
        }
        if !email_is_valid(&invoker.email) {
            return Err(DomainError::invalid_field(
                "invokedBy.email",
                "must be a valid email address",
            ));
        }

        let role = self.resolve_role(&invoker).await?;
        if !self.policy.allows(role, Capability::InvokeCommand) {
            return Err(DomainError::unauthorized(role, "invoke command"));
        }

        let object = self
            .objects
            .find_object(&target)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::target_not_found(&target.namespace, target.id))?;
        if !object.active {
            return Err(DomainError::inactive_target(&target.namespace, target.id));
        }

        let command = Command {
            identity: CommandIdentity::new(self.namespace.clone(), mini_app, Uuid::new_v4()),
            command_name: draft.command_name,
            target,
            invoked_at: Utc::now(),
            invoked_by: invoker,
            attributes: draft.attributes,
        };
        let command = self
            .repo
            .save(command)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        info!(identity = %command.identity, "Persisted command");

        // An unregistered mini-app is not an error: the persisted record
        // doubles as a generic acknowledgment.
        let Some(handler) = self.registry.get(mini_app) else {
            debug!("No handler registered, acknowledging");
            return Ok(Invocation::Acknowledged(command));
        };

        match mode {
            DispatchMode::Sync => match handler.run_command(&command).await {
                Ok(value) => Ok(Invocation::Completed(value)),
                Err(HandlerError::UnknownCommand { name }) => {
                    Err(DomainError::undefined_command(mini_app, name))
                }
                Err(HandlerError::Failed(e)) => {
                    Err(DomainError::handler_failed(mini_app, e.to_string()))
                }
            },
            DispatchMode::FireAndContinue => {
                self.dispatcher
                    .submit(handler, command.clone())
                    .await
                    .map_err(|e| DomainError::storage(e.to_string()))?;
                Ok(Invocation::Acknowledged(command))
            }
        }
    }

    #[instrument(name = "commands.service.get_all_commands", skip(self), fields(caller = %caller))]
    pub async fn get_all_commands(
        &self,
        caller: &UserIdentity,
    ) -> Result<Vec<Command>, DomainError> {
        self.require_admin(caller, "export commands").await?;
        self.repo
            .find_all()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    #[instrument(
        name = "commands.service.get_commands_for_mini_app",
        skip(self),
        fields(caller = %caller)
    )]
    pub async fn get_commands_for_mini_app(
        &self,
        mini_app: &str,
        caller: &UserIdentity,
    ) -> Result<Vec<Command>, DomainError> {
        self.require_admin(caller, "export mini-app commands").await?;
        self.repo
            .find_for_mini_app(mini_app)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    #[instrument(name = "commands.service.delete_all_commands", skip(self), fields(caller = %caller))]
    pub async fn delete_all_commands(&self, caller: &UserIdentity) -> Result<(), DomainError> {
        self.require_admin(caller, "delete all commands").await?;
        info!("Deleting all commands");
        self.repo
            .delete_all()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    async fn resolve_role(&self, caller: &UserIdentity) -> Result<Role, DomainError> {
        let user = self
            .users
            .find_user(&caller.namespace, &caller.email)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::unknown_invoker(&caller.namespace, &caller.email))?;
        Ok(user.role)
    }

    async fn require_admin(
        &self,
        caller: &UserIdentity,
        operation: &'static str,
    ) -> Result<(), DomainError> {
        let role = self.resolve_role(caller).await?;
        if !self.policy.allows(role, Capability::AdminOps) {
            return Err(DomainError::unauthorized(role, operation));
        }
        Ok(())
    }
}
