use serde::{Deserialize, Serialize};

/// Module configuration, read from the `commands` section of the
/// application config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    /// Bound of the fire-and-continue queue. Submissions wait when full.
    pub queue_capacity: usize,
    /// Number of background workers draining the queue.
    pub workers: usize,
    /// Roles allowed to invoke mini-app commands.
    pub invoker_roles: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 64,
            workers: 2,
            invoker_roles: vec!["MINIAPP_USER".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CommandsConfig::default();
        assert_eq!(config.queue_capacity, 64);
        assert_eq!(config.workers, 2);
        assert_eq!(config.invoker_roles, vec!["MINIAPP_USER"]);
    }

    #[test]
    fn partial_section_fills_in_defaults() {
        let config: CommandsConfig = serde_json::from_value(serde_json::json!({
            "workers": 4
        }))
        .unwrap();
        assert_eq!(config.workers, 4);
        assert_eq!(config.queue_capacity, 64);
    }
}
