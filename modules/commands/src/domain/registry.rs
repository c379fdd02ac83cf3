use std::sync::Arc;

use dashmap::DashMap;

use crate::contract::handler::MiniAppHandler;

/// Concurrent registry of mini-app handlers keyed by mini-app name.
///
/// Registration is open: a later registration under the same name replaces
/// the earlier one. Lookups for unregistered names return `None`, which the
/// service treats as an acknowledged-but-unhandled invocation.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: DashMap<String, Arc<dyn MiniAppHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, mini_app: impl Into<String>, handler: Arc<dyn MiniAppHandler>) {
        self.handlers.insert(mini_app.into(), handler);
    }

    pub fn get(&self, mini_app: &str) -> Option<Arc<dyn MiniAppHandler>> {
        self.handlers.get(mini_app).map(|entry| entry.value().clone())
    }
}
