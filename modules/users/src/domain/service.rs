use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::contract::model::{email_is_valid, NewUser, Role, User, UserIdentity, UserPatch};
use crate::contract::policy::{AccessPolicy, Capability};
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;

/// Domain service with the business rules for user management.
/// Depends only on the repository port and the access policy.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
    policy: Arc<dyn AccessPolicy>,
    namespace: String,
}

impl Service {
    pub fn new(
        repo: Arc<dyn UsersRepository>,
        policy: Arc<dyn AccessPolicy>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            policy,
            namespace: namespace.into(),
        }
    }

    /// The host namespace new identities are scoped to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[instrument(
        name = "users.service.create_user",
        skip(self, draft),
        fields(email = %draft.email)
    )]
    pub async fn create_user(&self, draft: NewUser) -> Result<User, DomainError> {
        info!("Creating user");

        let role = self.parse_role(&draft.role)?;
        if !email_is_valid(&draft.email) {
            return Err(DomainError::invalid_field("email", &draft.email));
        }
        Self::require_non_blank("username", &draft.display_name)?;
        Self::require_non_blank("avatar", &draft.avatar_url)?;

        // Namespace is assigned server-side, never client-supplied.
        let identity = UserIdentity::new(self.namespace.clone(), draft.email);

        if self.find_record(&identity).await?.is_some() {
            return Err(DomainError::user_already_exists(
                identity.namespace,
                identity.email,
            ));
        }

        let user = User {
            identity,
            role,
            display_name: draft.display_name,
            avatar_url: draft.avatar_url,
        };

        let user = self
            .repo
            .save(user)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        info!(identity = %user.identity, "Successfully created user");
        Ok(user)
    }

    /// Identity-check lookup, not credentialed authentication.
    #[instrument(name = "users.service.login", skip(self))]
    pub async fn login(&self, namespace: &str, email: &str) -> Result<User, DomainError> {
        debug!("Login lookup");

        if namespace != self.namespace {
            return Err(DomainError::foreign_namespace(namespace));
        }

        let identity = UserIdentity::new(namespace, email);
        self.find_record(&identity)
            .await?
            .ok_or_else(|| DomainError::user_not_found(namespace, email))
    }

    #[instrument(name = "users.service.update_user", skip(self, patch))]
    pub async fn update_user(
        &self,
        namespace: &str,
        email: &str,
        patch: UserPatch,
    ) -> Result<User, DomainError> {
        info!("Updating user");

        let identity = UserIdentity::new(namespace, email);
        let mut current = self
            .find_record(&identity)
            .await?
            .ok_or_else(|| DomainError::user_not_found(namespace, email))?;

        // Each present field is validated independently; the identity is
        // immutable and not part of the patch shape at all.
        if let Some(ref role) = patch.role {
            current.role = self.parse_role(role)?;
        }
        if let Some(display_name) = patch.display_name {
            Self::require_non_blank("username", &display_name)?;
            current.display_name = display_name;
        }
        if let Some(avatar_url) = patch.avatar_url {
            Self::require_non_blank("avatar", &avatar_url)?;
            current.avatar_url = avatar_url;
        }

        let user = self
            .repo
            .save(current)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        info!(identity = %user.identity, "Successfully updated user");
        Ok(user)
    }

    /// Plain lookup for in-process consumers (the contract client).
    pub async fn find_user(
        &self,
        namespace: &str,
        email: &str,
    ) -> Result<Option<User>, DomainError> {
        self.find_record(&UserIdentity::new(namespace, email)).await
    }

    #[instrument(name = "users.service.get_all_users", skip(self))]
    pub async fn get_all_users(&self, caller: &UserIdentity) -> Result<Vec<User>, DomainError> {
        self.require_admin(caller, "export users").await?;
        self.repo
            .find_all()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    #[instrument(name = "users.service.delete_all_users", skip(self))]
    pub async fn delete_all_users(&self, caller: &UserIdentity) -> Result<(), DomainError> {
        self.require_admin(caller, "delete all users").await?;
        info!("Deleting all users");
        self.repo
            .delete_all()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    // --- helpers ---

    async fn find_record(&self, identity: &UserIdentity) -> Result<Option<User>, DomainError> {
        self.repo
            .find(identity)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    async fn require_admin(
        &self,
        caller: &UserIdentity,
        operation: &'static str,
    ) -> Result<(), DomainError> {
        let caller_user = self
            .find_record(caller)
            .await?
            .ok_or_else(|| DomainError::user_not_found(&caller.namespace, &caller.email))?;

        if !self.policy.allows(caller_user.role, Capability::AdminOps) {
            return Err(DomainError::unauthorized(caller_user.role, operation));
        }
        Ok(())
    }

    fn parse_role(&self, role: &str) -> Result<Role, DomainError> {
        Role::parse(role).ok_or_else(|| DomainError::invalid_field("role", role))
    }

    fn require_non_blank(field: &'static str, value: &str) -> Result<(), DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::invalid_field(field, "must not be blank"));
        }
        Ok(())
    }
}
