use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use users::api::rest::routes;
use users::contract::policy::RoleMatrixPolicy;
use users::domain::service::Service;
use users::infra::storage::memory::MemoryUsersRepository;

fn app() -> Router {
    let service = Arc::new(Service::new(
        Arc::new(MemoryUsersRepository::new()),
        Arc::new(RoleMatrixPolicy::default()),
        "superapp",
    ));
    routes::router(service)
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn signup_then_login_roundtrip() {
    let app = app();

    let created = app
        .clone()
        .oneshot(json_post(
            "/superapp/users",
            serde_json::json!({
                "email": "alice@demo.org",
                "role": "NAMESPACE_USER",
                "username": "Alice",
                "avatar": "https://demo.org/alice.png"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let body = body_json(created).await;
    assert_eq!(body["userId"]["superapp"], "superapp");
    assert_eq!(body["userId"]["email"], "alice@demo.org");
    assert_eq!(body["role"], "NAMESPACE_USER");

    let login = app
        .oneshot(
            Request::builder()
                .uri("/superapp/users/login/superapp/alice@demo.org")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
    let body = body_json(login).await;
    assert_eq!(body["username"], "Alice");
}

#[tokio::test]
async fn signup_with_invalid_role_is_bad_request() {
    let response = app()
        .oneshot(json_post(
            "/superapp/users",
            serde_json::json!({
                "email": "bob@demo.org",
                "role": "WIZARD",
                "username": "Bob",
                "avatar": "https://demo.org/bob.png"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_of_unknown_user_is_not_found() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/superapp/users/login/superapp/ghost@demo.org")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_export_requires_admin_caller() {
    let app = app();

    app.clone()
        .oneshot(json_post(
            "/superapp/users",
            serde_json::json!({
                "email": "alice@demo.org",
                "role": "NAMESPACE_USER",
                "username": "Alice",
                "avatar": "https://demo.org/alice.png"
            }),
        ))
        .await
        .unwrap();

    let forbidden = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/superapp/admin/users?userSuperapp=superapp&userEmail=alice@demo.org")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
}
