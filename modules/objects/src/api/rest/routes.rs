use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Object graph routes plus the admin surface for the object collection.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            "/superapp/objects",
            get(handlers::list_objects).post(handlers::create_object),
        )
        .route(
            "/superapp/objects/{superapp}/{id}",
            get(handlers::get_object).put(handlers::update_object),
        )
        .route(
            "/superapp/objects/{superapp}/{id}/children",
            get(handlers::get_children).put(handlers::bind_child),
        )
        .route(
            "/superapp/objects/{superapp}/{id}/parents",
            get(handlers::get_parents),
        )
        .route(
            "/superapp/admin/objects",
            delete(handlers::delete_all_objects),
        )
        .layer(Extension(service))
}
