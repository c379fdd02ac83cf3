use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use axum::{routing::get, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use runtime::AppConfig;

use commands::config::CommandsConfig;
use commands::domain::dispatcher::Dispatcher;
use commands::domain::registry::HandlerRegistry;
use commands::infra::storage::memory::MemoryCommandsRepository;
use objects::contract::client::ObjectsApi;
use objects::gateways::local::ObjectsLocalClient;
use objects::infra::storage::memory::MemoryObjectsRepository;
use users::contract::client::UsersApi;
use users::contract::model::Role;
use users::contract::policy::{AccessPolicy, RoleMatrixPolicy};
use users::gateways::local::UsersLocalClient;
use users::infra::storage::memory::MemoryUsersRepository;

/// The wired platform: one merged router over the three module services.
///
/// The handler registry is exposed so embedders can plug mini-app handlers
/// in before serving; nothing is registered by default.
pub struct Platform {
    pub router: Router,
    pub dispatcher: Arc<Dispatcher>,
    pub registry: Arc<HandlerRegistry>,
}

pub fn build_platform(config: &AppConfig) -> Result<Platform> {
    let commands_config: CommandsConfig = config.module_config("commands")?;
    let invoker_roles = commands_config
        .invoker_roles
        .iter()
        .map(|name| {
            Role::parse(name)
                .ok_or_else(|| anyhow!("Unknown role '{name}' in commands.invoker_roles"))
        })
        .collect::<Result<Vec<_>>>()?;

    let policy: Arc<dyn AccessPolicy> = Arc::new(RoleMatrixPolicy::new(invoker_roles));
    let namespace = config.superapp.namespace.clone();

    let users_service = Arc::new(users::domain::service::Service::new(
        Arc::new(MemoryUsersRepository::new()),
        policy.clone(),
        namespace.clone(),
    ));
    let users_api: Arc<dyn UsersApi> = Arc::new(UsersLocalClient::new(users_service.clone()));

    let objects_service = Arc::new(objects::domain::service::Service::new(
        Arc::new(MemoryObjectsRepository::new()),
        users_api.clone(),
        policy.clone(),
        namespace.clone(),
    ));
    let objects_api: Arc<dyn ObjectsApi> = Arc::new(ObjectsLocalClient::new(objects_service.clone()));

    let registry = Arc::new(HandlerRegistry::new());
    let dispatcher = Arc::new(Dispatcher::new(
        commands_config.queue_capacity,
        commands_config.workers,
    ));
    let commands_service = Arc::new(commands::domain::service::Service::new(
        Arc::new(MemoryCommandsRepository::new()),
        users_api,
        objects_api,
        registry.clone(),
        dispatcher.clone(),
        policy,
        namespace,
    ));

    let mut router = Router::new()
        .route("/health", get(health))
        .merge(users::api::rest::routes::router(users_service))
        .merge(objects::api::rest::routes::router(objects_service))
        .merge(commands::api::rest::routes::router(commands_service))
        .layer(TraceLayer::new_for_http());

    if config.server.timeout_sec > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(
            config.server.timeout_sec,
        )));
    }

    Ok(Platform {
        router,
        dispatcher,
        registry,
    })
}

async fn health() -> &'static str {
    "OK"
}
