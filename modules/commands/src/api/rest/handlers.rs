use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde_json::Value;
use tracing::warn;

use crate::api::rest::dto::{CallerQuery, CommandDto, InvokeCommandReq, InvokeQuery};
use crate::contract::model::DispatchMode;
use crate::domain::error::DomainError;
use crate::domain::service::{Invocation, Service};

/// Invoke a command against a mini-app. `?async=true` selects
/// fire-and-continue; the default runs any registered handler inline.
pub async fn invoke_command(
    Extension(svc): Extension<Arc<Service>>,
    Path(mini_app): Path<String>,
    Query(query): Query<InvokeQuery>,
    Json(req): Json<InvokeCommandReq>,
) -> Result<Json<Value>, StatusCode> {
    let mode = if query.fire_and_continue {
        DispatchMode::FireAndContinue
    } else {
        DispatchMode::Sync
    };
    match svc.invoke(&mini_app, req.into(), mode).await {
        Ok(Invocation::Completed(value)) => Ok(Json(value)),
        Ok(Invocation::Acknowledged(command)) => {
            serde_json::to_value(CommandDto::from(command))
                .map(Json)
                .map_err(|e| {
                    warn!("Failed to serialize command acknowledgment: {e}");
                    StatusCode::INTERNAL_SERVER_ERROR
                })
        }
        Err(e) => Err(into_status(e)),
    }
}

/// Admin export of the full command history.
pub async fn get_all_commands(
    Extension(svc): Extension<Arc<Service>>,
    Query(caller): Query<CallerQuery>,
) -> Result<Json<Vec<CommandDto>>, StatusCode> {
    match svc.get_all_commands(&caller.into()).await {
        Ok(commands) => Ok(Json(commands.into_iter().map(CommandDto::from).collect())),
        Err(e) => Err(into_status(e)),
    }
}

/// Admin export of one mini-app's command history.
pub async fn get_commands_for_mini_app(
    Extension(svc): Extension<Arc<Service>>,
    Path(mini_app): Path<String>,
    Query(caller): Query<CallerQuery>,
) -> Result<Json<Vec<CommandDto>>, StatusCode> {
    match svc.get_commands_for_mini_app(&mini_app, &caller.into()).await {
        Ok(commands) => Ok(Json(commands.into_iter().map(CommandDto::from).collect())),
        Err(e) => Err(into_status(e)),
    }
}

/// Admin bulk delete of the command history.
pub async fn delete_all_commands(
    Extension(svc): Extension<Arc<Service>>,
    Query(caller): Query<CallerQuery>,
) -> Result<StatusCode, StatusCode> {
    match svc.delete_all_commands(&caller.into()).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(into_status(e)),
    }
}

/// Map domain errors to HTTP status codes.
fn into_status(error: DomainError) -> StatusCode {
    let status = match &error {
        DomainError::InvalidField { .. } | DomainError::InactiveTarget { .. } => {
            StatusCode::BAD_REQUEST
        }
        DomainError::UnknownInvoker { .. }
        | DomainError::TargetNotFound { .. }
        | DomainError::UndefinedCommand { .. } => StatusCode::NOT_FOUND,
        DomainError::Unauthorized { .. } => StatusCode::FORBIDDEN,
        DomainError::HandlerFailed { .. } | DomainError::Storage { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        warn!("Command operation failed: {error}");
    }
    status
}
