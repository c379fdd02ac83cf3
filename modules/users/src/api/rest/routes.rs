use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// User routes plus the admin surface for the user collection.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/superapp/users", post(handlers::create_user))
        .route(
            "/superapp/users/login/{superapp}/{email}",
            get(handlers::login),
        )
        .route(
            "/superapp/users/{superapp}/{email}",
            put(handlers::update_user),
        )
        .route(
            "/superapp/admin/users",
            get(handlers::get_all_users).delete(handlers::delete_all_users),
        )
        .layer(Extension(service))
}
