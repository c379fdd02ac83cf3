use serde::{Deserialize, Serialize};

/// Identity of a user within a namespace. Immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    pub namespace: String,
    pub email: String,
}

impl UserIdentity {
    pub fn new(namespace: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            email: email.into(),
        }
    }
}

impl std::fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.email)
    }
}

/// Platform role. Wire form is the SCREAMING_SNAKE string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    NamespaceUser,
    MiniappUser,
}

impl Role {
    /// Parse the wire form. Unknown strings are a validation failure at the
    /// caller, not a deserialization panic.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "ADMIN" => Some(Role::Admin),
            "NAMESPACE_USER" => Some(Role::NamespaceUser),
            "MINIAPP_USER" => Some(Role::MiniappUser),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::NamespaceUser => "NAMESPACE_USER",
            Role::MiniappUser => "MINIAPP_USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub identity: UserIdentity,
    pub role: Role,
    pub display_name: String,
    pub avatar_url: String,
}

/// Signup draft. The namespace is assigned server-side; the role arrives as a
/// string and is validated into [`Role`] by the service.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub role: String,
    pub display_name: String,
    pub avatar_url: String,
}

/// Partial update. Absent fields stay unchanged; present fields are validated
/// independently. The identity is never patchable.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub role: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Syntactic email check shared by every module that validates an identity:
/// non-empty local part, one `@`, dotted non-empty domain.
pub fn email_is_valid(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_forms_roundtrip() {
        for role in [Role::Admin, Role::NamespaceUser, Role::MiniappUser] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("SUPERVISOR"), None);
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn role_serde_uses_screaming_snake() {
        let json = serde_json::to_string(&Role::NamespaceUser).unwrap();
        assert_eq!(json, "\"NAMESPACE_USER\"");
        let back: Role = serde_json::from_str("\"MINIAPP_USER\"").unwrap();
        assert_eq!(back, Role::MiniappUser);
    }

    #[test]
    fn email_validation() {
        assert!(email_is_valid("alice@demo.org"));
        assert!(email_is_valid("a.b+c@sub.demo.org"));

        assert!(!email_is_valid(""));
        assert!(!email_is_valid("no-at-sign"));
        assert!(!email_is_valid("@demo.org"));
        assert!(!email_is_valid("alice@"));
        assert!(!email_is_valid("alice@nodots"));
        assert!(!email_is_valid("alice@.org"));
        assert!(!email_is_valid("alice@org."));
    }
}
