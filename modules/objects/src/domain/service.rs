use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use users::contract::client::UsersApi;
use users::contract::model::{email_is_valid, Role, UserIdentity};
use users::contract::policy::{AccessPolicy, Capability};

use crate::contract::model::{
    name_is_valid, DomainObject, Location, NewObject, ObjectIdentity, ObjectPatch,
};
use crate::domain::error::DomainError;
use crate::domain::repo::ObjectsRepository;

/// Domain service owning object lifecycle and the binding graph.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn ObjectsRepository>,
    users: Arc<dyn UsersApi>,
    policy: Arc<dyn AccessPolicy>,
    namespace: String,
}

impl Service {
    pub fn new(
        repo: Arc<dyn ObjectsRepository>,
        users: Arc<dyn UsersApi>,
        policy: Arc<dyn AccessPolicy>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            users,
            policy,
            namespace: namespace.into(),
        }
    }

    #[instrument(
        name = "objects.service.create_object",
        skip(self, draft),
        fields(alias = %draft.alias, caller = %caller)
    )]
    pub async fn create_object(
        &self,
        draft: NewObject,
        caller: &UserIdentity,
    ) -> Result<DomainObject, DomainError> {
        info!("Creating object");

        let role = self.resolve_role(caller).await?;
        self.authorize(role, Capability::CreateObject, "create object")?;

        Self::validate_name("type", &draft.object_type)?;
        Self::validate_name("alias", &draft.alias)?;
        if let Some(location) = &draft.location {
            Self::validate_location(location)?;
        }

        // Identity and timestamp are server-assigned; anything the client
        // sent for them never reaches this draft.
        let object = DomainObject {
            identity: ObjectIdentity::new(self.namespace.clone(), Uuid::new_v4()),
            object_type: draft.object_type,
            alias: draft.alias,
            active: draft.active.unwrap_or(true),
            created_at: Utc::now(),
            created_by: caller.clone(),
            location: draft.location,
            details: draft.details,
        };

        let object = self.save(object).await?;
        info!(identity = %object.identity, "Successfully created object");
        Ok(object)
    }

    /// Partial update addressed by the path identity. A different identity or
    /// timestamp inside the patch body is silently ignored (the patch shape
    /// has no such fields); renaming ids is not a thing this platform does.
    #[instrument(
        name = "objects.service.update_object",
        skip(self, patch),
        fields(target = %target, caller = %caller)
    )]
    pub async fn update_object(
        &self,
        target: &ObjectIdentity,
        patch: ObjectPatch,
        caller: &UserIdentity,
    ) -> Result<DomainObject, DomainError> {
        info!("Updating object");

        let role = self.resolve_role(caller).await?;
        self.authorize(role, Capability::UpdateObject, "update object")?;

        let mut current = self.require_object(target).await?;

        if let Some(object_type) = patch.object_type {
            Self::validate_name("type", &object_type)?;
            current.object_type = object_type;
        }
        if let Some(alias) = patch.alias {
            Self::validate_name("alias", &alias)?;
            current.alias = alias;
        }
        if let Some(active) = patch.active {
            current.active = active;
        }
        if let Some(location) = patch.location {
            Self::validate_location(&location)?;
            current.location = Some(location);
        }
        if let Some(created_by) = patch.created_by {
            Self::validate_creator(&created_by)?;
            current.created_by = created_by;
        }
        if let Some(details) = patch.details {
            current.details = details;
        }

        let object = self.save(current).await?;
        info!("Successfully updated object");
        Ok(object)
    }

    #[instrument(name = "objects.service.get_object", skip(self), fields(id = %id, caller = %caller))]
    pub async fn get_object(
        &self,
        id: &ObjectIdentity,
        caller: &UserIdentity,
    ) -> Result<DomainObject, DomainError> {
        let role = self.resolve_role(caller).await?;
        self.authorize(role, Capability::ReadObject, "read object")?;

        let object = self.require_object(id).await?;
        // Mini-app callers only ever observe active objects.
        if role == Role::MiniappUser && !object.active {
            return Err(DomainError::object_not_found(&id.namespace, id.id));
        }
        Ok(object)
    }

    #[instrument(name = "objects.service.list_objects", skip(self), fields(caller = %caller))]
    pub async fn list_objects(
        &self,
        caller: &UserIdentity,
    ) -> Result<Vec<DomainObject>, DomainError> {
        let role = self.resolve_role(caller).await?;
        self.authorize(role, Capability::ReadObject, "list objects")?;

        let mut objects = self
            .repo
            .find_all()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        if role == Role::MiniappUser {
            objects.retain(|o| o.active);
        }
        debug!(count = objects.len(), "Listed objects");
        Ok(objects)
    }

    /// Bind `child` under `parent`. The self-binding check runs before any
    /// existence lookup so `bind(P, P)` is InvalidInput in every state.
    #[instrument(
        name = "objects.service.bind_child",
        skip(self),
        fields(parent = %parent, child = %child, caller = %caller)
    )]
    pub async fn bind_child(
        &self,
        parent: &ObjectIdentity,
        child: &ObjectIdentity,
        caller: &UserIdentity,
    ) -> Result<(), DomainError> {
        info!("Binding child to parent");

        let role = self.resolve_role(caller).await?;
        self.authorize(role, Capability::BindObjects, "bind objects")?;

        if parent == child {
            return Err(DomainError::SelfBinding);
        }

        self.require_object(parent).await?;
        self.require_object(child).await?;

        let inserted = self
            .repo
            .insert_edge(parent, child)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        if !inserted {
            return Err(DomainError::duplicate_binding(parent.id, child.id));
        }

        info!("Successfully bound child");
        Ok(())
    }

    #[instrument(name = "objects.service.children_of", skip(self), fields(parent = %parent, caller = %caller))]
    pub async fn children_of(
        &self,
        parent: &ObjectIdentity,
        caller: &UserIdentity,
    ) -> Result<Vec<DomainObject>, DomainError> {
        let role = self.resolve_role(caller).await?;
        self.authorize(role, Capability::ReadRelations, "read children")?;

        self.require_visible_anchor(parent, role).await?;
        let edges = self
            .repo
            .children_of(parent)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        self.resolve_edges(edges, role).await
    }

    #[instrument(name = "objects.service.parents_of", skip(self), fields(child = %child, caller = %caller))]
    pub async fn parents_of(
        &self,
        child: &ObjectIdentity,
        caller: &UserIdentity,
    ) -> Result<Vec<DomainObject>, DomainError> {
        let role = self.resolve_role(caller).await?;
        self.authorize(role, Capability::ReadRelations, "read parents")?;

        self.require_visible_anchor(child, role).await?;
        let edges = self
            .repo
            .parents_of(child)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        self.resolve_edges(edges, role).await
    }

    #[instrument(name = "objects.service.delete_all_objects", skip(self), fields(caller = %caller))]
    pub async fn delete_all_objects(&self, caller: &UserIdentity) -> Result<(), DomainError> {
        let role = self.resolve_role(caller).await?;
        self.authorize(role, Capability::AdminOps, "delete all objects")?;

        info!("Deleting all objects and bindings");
        self.repo
            .delete_all()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    /// Raw lookup for in-process consumers (the contract client). No policy
    /// filtering: the consumer applies its own rules.
    pub async fn find_object(
        &self,
        identity: &ObjectIdentity,
    ) -> Result<Option<DomainObject>, DomainError> {
        self.repo
            .find(identity)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    // --- helpers ---

    async fn save(&self, object: DomainObject) -> Result<DomainObject, DomainError> {
        self.repo
            .save(object)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    async fn require_object(&self, id: &ObjectIdentity) -> Result<DomainObject, DomainError> {
        self.find_object(id)
            .await?
            .ok_or_else(|| DomainError::object_not_found(&id.namespace, id.id))
    }

    /// The anchor of a relation query must exist, and must be visible to the
    /// caller (mini-app callers cannot anchor on inactive objects).
    async fn require_visible_anchor(
        &self,
        id: &ObjectIdentity,
        role: Role,
    ) -> Result<(), DomainError> {
        let anchor = self.require_object(id).await?;
        if role == Role::MiniappUser && !anchor.active {
            return Err(DomainError::object_not_found(&id.namespace, id.id));
        }
        Ok(())
    }

    async fn resolve_edges(
        &self,
        identities: Vec<ObjectIdentity>,
        role: Role,
    ) -> Result<Vec<DomainObject>, DomainError> {
        let mut resolved = Vec::with_capacity(identities.len());
        for identity in &identities {
            // A dangling edge (record deleted out from under it) is skipped,
            // not an error.
            if let Some(object) = self.find_object(identity).await? {
                if role == Role::MiniappUser && !object.active {
                    continue;
                }
                resolved.push(object);
            }
        }
        Ok(resolved)
    }

    async fn resolve_role(&self, caller: &UserIdentity) -> Result<Role, DomainError> {
        let user = self
            .users
            .find_user(&caller.namespace, &caller.email)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::unknown_caller(&caller.namespace, &caller.email))?;
        Ok(user.role)
    }

    fn authorize(
        &self,
        role: Role,
        capability: Capability,
        operation: &'static str,
    ) -> Result<(), DomainError> {
        if !self.policy.allows(role, capability) {
            return Err(DomainError::unauthorized(role, operation));
        }
        Ok(())
    }

    fn validate_name(field: &'static str, value: &str) -> Result<(), DomainError> {
        if !name_is_valid(value) {
            return Err(DomainError::invalid_field(
                field,
                "must be non-empty letters and spaces",
            ));
        }
        Ok(())
    }

    fn validate_location(location: &Location) -> Result<(), DomainError> {
        if !location.in_bounds() {
            return Err(DomainError::invalid_field(
                "location",
                format!("out of bounds: ({}, {})", location.lat, location.lng),
            ));
        }
        Ok(())
    }

    fn validate_creator(created_by: &UserIdentity) -> Result<(), DomainError> {
        if created_by.namespace.trim().is_empty() || !email_is_valid(&created_by.email) {
            return Err(DomainError::invalid_field(
                "createdBy",
                "must carry a namespace and a valid email",
            ));
        }
        Ok(())
    }
}
