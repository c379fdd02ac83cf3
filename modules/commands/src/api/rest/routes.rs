use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Command invocation route plus the admin surface for the command history.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            "/superapp/miniapp/{miniAppName}",
            post(handlers::invoke_command),
        )
        .route(
            "/superapp/admin/miniapp",
            get(handlers::get_all_commands).delete(handlers::delete_all_commands),
        )
        .route(
            "/superapp/admin/miniapp/{miniAppName}",
            get(handlers::get_commands_for_mini_app),
        )
        .layer(Extension(service))
}
