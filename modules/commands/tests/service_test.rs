use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use commands::contract::handler::{HandlerError, MiniAppHandler};
use commands::contract::model::{Command, DispatchMode, NewCommand};
use commands::domain::dispatcher::Dispatcher;
use commands::domain::error::DomainError;
use commands::domain::registry::HandlerRegistry;
use commands::domain::service::{Invocation, Service};
use commands::infra::storage::memory::MemoryCommandsRepository;

use objects::contract::client::ObjectsApi;
use objects::contract::model::{NewObject, ObjectIdentity};
use objects::gateways::local::ObjectsLocalClient;
use objects::infra::storage::memory::MemoryObjectsRepository;

use users::contract::client::UsersApi;
use users::contract::model::{NewUser, UserIdentity};
use users::contract::policy::RoleMatrixPolicy;
use users::gateways::local::UsersLocalClient;
use users::infra::storage::memory::MemoryUsersRepository;

const NS: &str = "superapp";

struct Harness {
    commands: Service,
    objects: Arc<objects::domain::service::Service>,
    registry: Arc<HandlerRegistry>,
}

async fn harness() -> Harness {
    let policy = Arc::new(RoleMatrixPolicy::default());

    let users_service = Arc::new(users::domain::service::Service::new(
        Arc::new(MemoryUsersRepository::new()),
        policy.clone(),
        NS,
    ));
    for (email, role) in [
        ("alice@demo.org", "NAMESPACE_USER"),
        ("mini@demo.org", "MINIAPP_USER"),
        ("admin@demo.org", "ADMIN"),
    ] {
        users_service
            .create_user(NewUser {
                email: email.to_string(),
                role: role.to_string(),
                display_name: "Seeded".to_string(),
                avatar_url: "https://demo.org/a.png".to_string(),
            })
            .await
            .unwrap();
    }
    let users_api: Arc<dyn UsersApi> = Arc::new(UsersLocalClient::new(users_service));

    let objects_service = Arc::new(objects::domain::service::Service::new(
        Arc::new(MemoryObjectsRepository::new()),
        users_api.clone(),
        policy.clone(),
        NS,
    ));
    let objects_api: Arc<dyn ObjectsApi> = Arc::new(ObjectsLocalClient::new(objects_service.clone()));

    let registry = Arc::new(HandlerRegistry::new());
    let commands = Service::new(
        Arc::new(MemoryCommandsRepository::new()),
        users_api,
        objects_api,
        registry.clone(),
        Arc::new(Dispatcher::new(8, 1)),
        policy,
        NS,
    );

    Harness {
        commands,
        objects: objects_service,
        registry,
    }
}

fn alice() -> UserIdentity {
    UserIdentity::new(NS, "alice@demo.org")
}

fn mini() -> UserIdentity {
    UserIdentity::new(NS, "mini@demo.org")
}

fn admin() -> UserIdentity {
    UserIdentity::new(NS, "admin@demo.org")
}

async fn seed_object(h: &Harness, active: bool) -> ObjectIdentity {
    h.objects
        .create_object(
            NewObject {
                object_type: "dummyType".to_string(),
                alias: "demo".to_string(),
                active: Some(active),
                location: None,
                details: Default::default(),
            },
            &alice(),
        )
        .await
        .unwrap()
        .identity
}

fn draft(name: &str, target: ObjectIdentity, invoker: UserIdentity) -> NewCommand {
    NewCommand {
        command_name: name.to_string(),
        target: Some(target),
        invoked_by: Some(invoker),
        attributes: Map::new(),
    }
}

struct Echo;

#[async_trait]
impl MiniAppHandler for Echo {
    async fn run_command(&self, command: &Command) -> Result<Value, HandlerError> {
        match command.command_name.as_str() {
            "echo" => Ok(json!({ "echoed": command.command_name })),
            other => Err(HandlerError::unknown_command(other)),
        }
    }
}

struct Counting(Arc<AtomicUsize>);

#[async_trait]
impl MiniAppHandler for Counting {
    async fn run_command(&self, _command: &Command) -> Result<Value, HandlerError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(json!(null))
    }
}

#[tokio::test]
async fn unregistered_mini_app_gets_persisted_acknowledgment() {
    let h = harness().await;
    let target = seed_object(&h, true).await;

    // The platform scenario: a command against the unregistered mini-app
    // "test" is persisted and acknowledged, never rejected.
    let outcome = h
        .commands
        .invoke("test", draft("doSomething", target.clone(), mini()), DispatchMode::Sync)
        .await
        .unwrap();

    let Invocation::Acknowledged(command) = outcome else {
        panic!("expected acknowledgment");
    };
    assert_eq!(command.identity.namespace, NS);
    assert_eq!(command.identity.mini_app, "test");
    assert_eq!(command.command_name, "doSomething");
    assert_eq!(command.target, target);
    assert_eq!(command.invoked_by, mini());

    // And the record is in the admin export.
    let all = h.commands.get_all_commands(&admin()).await.unwrap();
    assert_eq!(all, vec![command]);
}

#[tokio::test]
async fn validation_failures_are_distinct_and_ordered() {
    let h = harness().await;
    let target = seed_object(&h, true).await;

    // 1: missing target.
    let mut d = draft("doSomething", target.clone(), mini());
    d.target = None;
    assert!(matches!(
        h.commands.invoke("test", d, DispatchMode::Sync).await,
        Err(DomainError::InvalidField { ref field, .. }) if field == "targetObject"
    ));

    // 2: missing invoker.
    let mut d = draft("doSomething", target.clone(), mini());
    d.invoked_by = None;
    assert!(matches!(
        h.commands.invoke("test", d, DispatchMode::Sync).await,
        Err(DomainError::InvalidField { ref field, .. }) if field == "invokedBy"
    ));

    // 3: blank command name, then malformed invoker email.
    assert!(matches!(
        h.commands
            .invoke("test", draft("  ", target.clone(), mini()), DispatchMode::Sync)
            .await,
        Err(DomainError::InvalidField { ref field, .. }) if field == "command"
    ));
    assert!(matches!(
        h.commands
            .invoke(
                "test",
                draft("doSomething", target.clone(), UserIdentity::new(NS, "not-an-email")),
                DispatchMode::Sync
            )
            .await,
        Err(DomainError::InvalidField { ref field, .. }) if field == "invokedBy.email"
    ));

    // 4: unknown invoker.
    assert!(matches!(
        h.commands
            .invoke(
                "test",
                draft("doSomething", target.clone(), UserIdentity::new(NS, "ghost@demo.org")),
                DispatchMode::Sync
            )
            .await,
        Err(DomainError::UnknownInvoker { .. })
    ));

    // 5: role outside the invoker policy.
    assert!(matches!(
        h.commands
            .invoke("test", draft("doSomething", target.clone(), alice()), DispatchMode::Sync)
            .await,
        Err(DomainError::Unauthorized { .. })
    ));

    // 6: missing target object.
    let ghost = ObjectIdentity::new(NS, Uuid::new_v4());
    assert!(matches!(
        h.commands
            .invoke("test", draft("doSomething", ghost, mini()), DispatchMode::Sync)
            .await,
        Err(DomainError::TargetNotFound { .. })
    ));
}

#[tokio::test]
async fn inactive_target_rejects_invocation() {
    let h = harness().await;
    let inactive = seed_object(&h, false).await;
    let active = seed_object(&h, true).await;

    assert!(matches!(
        h.commands
            .invoke("test", draft("doSomething", inactive, mini()), DispatchMode::Sync)
            .await,
        Err(DomainError::InactiveTarget { .. })
    ));
    assert!(h
        .commands
        .invoke("test", draft("doSomething", active, mini()), DispatchMode::Sync)
        .await
        .is_ok());
}

#[tokio::test]
async fn registered_handler_runs_inline_in_sync_mode() {
    let h = harness().await;
    let target = seed_object(&h, true).await;
    h.registry.register("chat", Arc::new(Echo));

    let outcome = h
        .commands
        .invoke("chat", draft("echo", target.clone(), mini()), DispatchMode::Sync)
        .await
        .unwrap();
    let Invocation::Completed(value) = outcome else {
        panic!("expected handler result");
    };
    assert_eq!(value, json!({ "echoed": "echo" }));

    // A command the handler does not know is "undefined".
    assert!(matches!(
        h.commands
            .invoke("chat", draft("bogus", target, mini()), DispatchMode::Sync)
            .await,
        Err(DomainError::UndefinedCommand { .. })
    ));
}

#[tokio::test]
async fn fire_and_continue_acknowledges_then_runs_in_background() {
    let h = harness().await;
    let target = seed_object(&h, true).await;
    let ran = Arc::new(AtomicUsize::new(0));
    h.registry.register("slow", Arc::new(Counting(ran.clone())));

    let outcome = h
        .commands
        .invoke(
            "slow",
            draft("doSomething", target, mini()),
            DispatchMode::FireAndContinue,
        )
        .await
        .unwrap();
    assert!(matches!(outcome, Invocation::Acknowledged(_)));

    // The worker picks the job up shortly after.
    for _ in 0..50 {
        if ran.load(Ordering::SeqCst) == 1 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("background handler never ran");
}

#[tokio::test]
async fn admin_surface_is_admin_only() {
    let h = harness().await;
    let target = seed_object(&h, true).await;
    h.commands
        .invoke("chat", draft("doSomething", target.clone(), mini()), DispatchMode::Sync)
        .await
        .unwrap();
    h.commands
        .invoke("maps", draft("doSomething", target, mini()), DispatchMode::Sync)
        .await
        .unwrap();

    assert!(matches!(
        h.commands.get_all_commands(&mini()).await,
        Err(DomainError::Unauthorized { .. })
    ));
    assert!(matches!(
        h.commands.delete_all_commands(&alice()).await,
        Err(DomainError::Unauthorized { .. })
    ));

    assert_eq!(h.commands.get_all_commands(&admin()).await.unwrap().len(), 2);
    assert_eq!(
        h.commands
            .get_commands_for_mini_app("chat", &admin())
            .await
            .unwrap()
            .len(),
        1
    );

    h.commands.delete_all_commands(&admin()).await.unwrap();
    assert!(h.commands.get_all_commands(&admin()).await.unwrap().is_empty());
}
