use crate::contract::model::Role;

/// A capability a caller's role must hold for an operation to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    CreateObject,
    UpdateObject,
    ReadObject,
    BindObjects,
    ReadRelations,
    InvokeCommand,
    AdminOps,
}

/// Swappable authorization matrix consumed by the object graph and command
/// dispatch services. The matrix is application policy, not architecture;
/// services only ask allow/deny.
pub trait AccessPolicy: Send + Sync {
    fn allows(&self, role: Role, capability: Capability) -> bool;
}

/// The platform's observed role matrix. The set of roles permitted to invoke
/// mini-app commands is configurable; everything else is fixed:
/// NAMESPACE_USER owns object mutation and binding, MINIAPP_USER gets
/// read access (active objects only, enforced by the object service), and
/// ADMIN is confined to the admin bulk surface.
#[derive(Debug, Clone)]
pub struct RoleMatrixPolicy {
    invoker_roles: Vec<Role>,
}

impl RoleMatrixPolicy {
    pub fn new(invoker_roles: Vec<Role>) -> Self {
        Self { invoker_roles }
    }
}

impl Default for RoleMatrixPolicy {
    fn default() -> Self {
        Self::new(vec![Role::MiniappUser])
    }
}

impl AccessPolicy for RoleMatrixPolicy {
    fn allows(&self, role: Role, capability: Capability) -> bool {
        match capability {
            Capability::CreateObject | Capability::UpdateObject | Capability::BindObjects => {
                role == Role::NamespaceUser
            }
            Capability::ReadObject | Capability::ReadRelations => {
                matches!(role, Role::NamespaceUser | Role::MiniappUser)
            }
            Capability::InvokeCommand => self.invoker_roles.contains(&role),
            Capability::AdminOps => role == Role::Admin,
        }
    }
}
