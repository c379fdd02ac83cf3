use serde::{Deserialize, Serialize};

use crate::contract::model::{NewUser, User, UserIdentity, UserPatch};

/// Wire shape of a user identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdDto {
    pub superapp: String,
    pub email: String,
}

/// REST DTO for user representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: UserIdDto,
    pub role: String,
    pub username: String,
    pub avatar: String,
}

/// Signup request. The namespace is server-assigned and therefore absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserReq {
    pub email: String,
    pub role: String,
    pub username: String,
    pub avatar: String,
}

/// Partial update request.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateUserReq {
    pub role: Option<String>,
    pub username: Option<String>,
    pub avatar: Option<String>,
}

/// Caller identity carried as query parameters on privileged routes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerQuery {
    pub user_superapp: String,
    pub user_email: String,
}

impl From<CallerQuery> for UserIdentity {
    fn from(q: CallerQuery) -> Self {
        UserIdentity::new(q.user_superapp, q.user_email)
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            user_id: UserIdDto {
                superapp: user.identity.namespace,
                email: user.identity.email,
            },
            role: user.role.as_str().to_string(),
            username: user.display_name,
            avatar: user.avatar_url,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            email: req.email,
            role: req.role,
            display_name: req.username,
            avatar_url: req.avatar,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            role: req.role,
            display_name: req.username,
            avatar_url: req.avatar,
        }
    }
}
