use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    Extension,
};
use tracing::warn;

use crate::api::rest::dto::{CallerQuery, CreateUserReq, UpdateUserReq, UserDto};
use crate::domain::error::DomainError;
use crate::domain::service::Service;

/// Create a new user (signup).
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<CreateUserReq>,
) -> Result<(StatusCode, Json<UserDto>), StatusCode> {
    match svc.create_user(req.into()).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(UserDto::from(user)))),
        Err(e) => Err(into_status(e)),
    }
}

/// Identity-check lookup by namespace and email.
pub async fn login(
    Extension(svc): Extension<Arc<Service>>,
    Path((superapp, email)): Path<(String, String)>,
) -> Result<Json<UserDto>, StatusCode> {
    match svc.login(&superapp, &email).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => Err(into_status(e)),
    }
}

/// Partial update of role/username/avatar.
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    Path((superapp, email)): Path<(String, String)>,
    Json(req): Json<UpdateUserReq>,
) -> Result<Json<UserDto>, StatusCode> {
    match svc.update_user(&superapp, &email, req.into()).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => Err(into_status(e)),
    }
}

/// Admin export of all users.
pub async fn get_all_users(
    Extension(svc): Extension<Arc<Service>>,
    Query(caller): Query<CallerQuery>,
) -> Result<Json<Vec<UserDto>>, StatusCode> {
    match svc.get_all_users(&caller.into()).await {
        Ok(users) => Ok(Json(users.into_iter().map(UserDto::from).collect())),
        Err(e) => Err(into_status(e)),
    }
}

/// Admin bulk delete of all users.
pub async fn delete_all_users(
    Extension(svc): Extension<Arc<Service>>,
    Query(caller): Query<CallerQuery>,
) -> Result<StatusCode, StatusCode> {
    match svc.delete_all_users(&caller.into()).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(into_status(e)),
    }
}

/// Map domain errors to HTTP status codes.
fn into_status(error: DomainError) -> StatusCode {
    let status = match &error {
        DomainError::InvalidField { .. } | DomainError::ForeignNamespace { .. } => {
            StatusCode::BAD_REQUEST
        }
        DomainError::UserNotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::UserAlreadyExists { .. } => StatusCode::CONFLICT,
        DomainError::Unauthorized { .. } => StatusCode::FORBIDDEN,
        DomainError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        warn!("User operation failed: {error}");
    }
    status
}
