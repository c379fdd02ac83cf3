use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    Extension,
};
use tracing::warn;
use uuid::Uuid;

use crate::api::rest::dto::{
    CallerQuery, CreateObjectReq, ObjectDto, ObjectIdDto, UpdateObjectReq,
};
use crate::contract::model::ObjectIdentity;
use crate::domain::error::DomainError;
use crate::domain::service::Service;

/// Create a new domain object.
pub async fn create_object(
    Extension(svc): Extension<Arc<Service>>,
    Query(caller): Query<CallerQuery>,
    Json(req): Json<CreateObjectReq>,
) -> Result<(StatusCode, Json<ObjectDto>), StatusCode> {
    match svc.create_object(req.into(), &caller.into()).await {
        Ok(object) => Ok((StatusCode::CREATED, Json(ObjectDto::from(object)))),
        Err(e) => Err(into_status(e)),
    }
}

/// Fetch a single object by identity.
pub async fn get_object(
    Extension(svc): Extension<Arc<Service>>,
    Path((superapp, id)): Path<(String, Uuid)>,
    Query(caller): Query<CallerQuery>,
) -> Result<Json<ObjectDto>, StatusCode> {
    let identity = ObjectIdentity::new(superapp, id);
    match svc.get_object(&identity, &caller.into()).await {
        Ok(object) => Ok(Json(ObjectDto::from(object))),
        Err(e) => Err(into_status(e)),
    }
}

/// List all objects visible to the caller.
pub async fn list_objects(
    Extension(svc): Extension<Arc<Service>>,
    Query(caller): Query<CallerQuery>,
) -> Result<Json<Vec<ObjectDto>>, StatusCode> {
    match svc.list_objects(&caller.into()).await {
        Ok(objects) => Ok(Json(objects.into_iter().map(ObjectDto::from).collect())),
        Err(e) => Err(into_status(e)),
    }
}

/// Partial update addressed by the path identity.
pub async fn update_object(
    Extension(svc): Extension<Arc<Service>>,
    Path((superapp, id)): Path<(String, Uuid)>,
    Query(caller): Query<CallerQuery>,
    Json(req): Json<UpdateObjectReq>,
) -> Result<Json<ObjectDto>, StatusCode> {
    let identity = ObjectIdentity::new(superapp, id);
    match svc.update_object(&identity, req.into(), &caller.into()).await {
        Ok(object) => Ok(Json(ObjectDto::from(object))),
        Err(e) => Err(into_status(e)),
    }
}

/// Bind the child given in the body under the parent in the path.
pub async fn bind_child(
    Extension(svc): Extension<Arc<Service>>,
    Path((superapp, id)): Path<(String, Uuid)>,
    Query(caller): Query<CallerQuery>,
    Json(child): Json<ObjectIdDto>,
) -> Result<StatusCode, StatusCode> {
    let parent = ObjectIdentity::new(superapp, id);
    match svc.bind_child(&parent, &child.into(), &caller.into()).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(into_status(e)),
    }
}

/// Children of the parent in the path, resolved to full records.
pub async fn get_children(
    Extension(svc): Extension<Arc<Service>>,
    Path((superapp, id)): Path<(String, Uuid)>,
    Query(caller): Query<CallerQuery>,
) -> Result<Json<Vec<ObjectDto>>, StatusCode> {
    let parent = ObjectIdentity::new(superapp, id);
    match svc.children_of(&parent, &caller.into()).await {
        Ok(objects) => Ok(Json(objects.into_iter().map(ObjectDto::from).collect())),
        Err(e) => Err(into_status(e)),
    }
}

/// Parents of the child in the path, resolved to full records.
pub async fn get_parents(
    Extension(svc): Extension<Arc<Service>>,
    Path((superapp, id)): Path<(String, Uuid)>,
    Query(caller): Query<CallerQuery>,
) -> Result<Json<Vec<ObjectDto>>, StatusCode> {
    let child = ObjectIdentity::new(superapp, id);
    match svc.parents_of(&child, &caller.into()).await {
        Ok(objects) => Ok(Json(objects.into_iter().map(ObjectDto::from).collect())),
        Err(e) => Err(into_status(e)),
    }
}

/// Admin bulk delete of all objects and bindings.
pub async fn delete_all_objects(
    Extension(svc): Extension<Arc<Service>>,
    Query(caller): Query<CallerQuery>,
) -> Result<StatusCode, StatusCode> {
    match svc.delete_all_objects(&caller.into()).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(into_status(e)),
    }
}

/// Map domain errors to HTTP status codes.
fn into_status(error: DomainError) -> StatusCode {
    let status = match &error {
        DomainError::InvalidField { .. } | DomainError::SelfBinding => StatusCode::BAD_REQUEST,
        DomainError::ObjectNotFound { .. } | DomainError::UnknownCaller { .. } => {
            StatusCode::NOT_FOUND
        }
        DomainError::DuplicateBinding { .. } => StatusCode::CONFLICT,
        DomainError::Unauthorized { .. } => StatusCode::FORBIDDEN,
        DomainError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        warn!("Object operation failed: {error}");
    }
    status
}
