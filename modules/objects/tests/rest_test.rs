use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use objects::api::rest::routes;
use objects::domain::service::Service;
use objects::infra::storage::memory::MemoryObjectsRepository;

use users::contract::client::UsersApi;
use users::contract::model::NewUser;
use users::contract::policy::RoleMatrixPolicy;
use users::gateways::local::UsersLocalClient;
use users::infra::storage::memory::MemoryUsersRepository;

async fn app() -> Router {
    let policy = Arc::new(RoleMatrixPolicy::default());
    let users_service = Arc::new(users::domain::service::Service::new(
        Arc::new(MemoryUsersRepository::new()),
        policy.clone(),
        "superapp",
    ));
    users_service
        .create_user(NewUser {
            email: "alice@demo.org".to_string(),
            role: "NAMESPACE_USER".to_string(),
            display_name: "Alice".to_string(),
            avatar_url: "https://demo.org/alice.png".to_string(),
        })
        .await
        .unwrap();
    let users_api: Arc<dyn UsersApi> = Arc::new(UsersLocalClient::new(users_service));

    let service = Arc::new(Service::new(
        Arc::new(MemoryObjectsRepository::new()),
        users_api,
        policy,
        "superapp",
    ));
    routes::router(service)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

const CALLER: &str = "userSuperapp=superapp&userEmail=alice@demo.org";

#[tokio::test]
async fn create_then_fetch_roundtrip() {
    let app = app().await;

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/superapp/objects?{CALLER}"),
            serde_json::json!({
                "type": "dummyType",
                "alias": "demo",
                "objectDetails": { "key": "value" }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let body = body_json(created).await;
    assert_eq!(body["objectId"]["superapp"], "superapp");
    assert_eq!(body["type"], "dummyType");
    assert_eq!(body["active"], true);
    assert_eq!(body["createdBy"]["userId"]["email"], "alice@demo.org");
    assert_eq!(body["objectDetails"]["key"], "value");
    let id = body["objectId"]["id"].as_str().unwrap().to_string();

    let fetched = app
        .oneshot(
            Request::builder()
                .uri(format!("/superapp/objects/superapp/{id}?{CALLER}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    let body = body_json(fetched).await;
    assert_eq!(body["objectId"]["id"], id);
}

#[tokio::test]
async fn bind_then_list_children() {
    let app = app().await;

    let mut ids = Vec::new();
    for alias in ["parent", "child"] {
        let created = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/superapp/objects?{CALLER}"),
                serde_json::json!({ "type": "dummyType", "alias": alias }),
            ))
            .await
            .unwrap();
        let body = body_json(created).await;
        ids.push(body["objectId"]["id"].as_str().unwrap().to_string());
    }
    let (parent, child) = (&ids[0], &ids[1]);

    let bound = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/superapp/objects/superapp/{parent}/children?{CALLER}"),
            serde_json::json!({ "superapp": "superapp", "id": child }),
        ))
        .await
        .unwrap();
    assert_eq!(bound.status(), StatusCode::NO_CONTENT);

    // Binding the same pair again conflicts.
    let again = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/superapp/objects/superapp/{parent}/children?{CALLER}"),
            serde_json::json!({ "superapp": "superapp", "id": child }),
        ))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let children = app
        .oneshot(
            Request::builder()
                .uri(format!("/superapp/objects/superapp/{parent}/children?{CALLER}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(children.status(), StatusCode::OK);
    let body = body_json(children).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["objectId"]["id"], child.as_str());
}

#[tokio::test]
async fn fetch_of_unknown_object_is_not_found() {
    let app = app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/superapp/objects/superapp/{}?{CALLER}",
                    uuid::Uuid::new_v4()
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
