use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main application configuration with strongly-typed global sections
/// and a flexible per-module configuration bag.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Platform-level settings (host namespace etc.).
    #[serde(default)]
    pub superapp: SuperAppConfig,
    /// Logging configuration (optional, uses defaults if None).
    pub logging: Option<LoggingConfig>,
    /// Per-module configuration bag: module name → arbitrary JSON/YAML value.
    #[serde(default)]
    pub modules: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub timeout_sec: u64,
}

/// Platform-wide settings. The namespace is the tenant every server-assigned
/// identity is scoped to; it is never taken from a client request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SuperAppConfig {
    pub namespace: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Env-filter directive, e.g. "info" or "info,superapp_server=debug".
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8084,
            timeout_sec: 0,
        }
    }
}

impl Default for SuperAppConfig {
    fn default() -> Self {
        Self {
            namespace: "superapp".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            superapp: SuperAppConfig::default(),
            logging: Some(LoggingConfig::default()),
            modules: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration with layered loading: defaults → YAML file → environment
    /// variables (`APP__SERVER__PORT=8084` maps to `server.port`).
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        // Start from a minimal base where optional sections are None, so they
        // remain None unless explicitly provided by YAML/ENV.
        let base = AppConfig {
            server: ServerConfig::default(),
            superapp: SuperAppConfig::default(),
            logging: None,
            modules: HashMap::new(),
        };

        let config: AppConfig = Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Yaml::file(config_path.as_ref()))
            .merge(Env::prefixed("APP__").split("__"))
            .extract()
            .with_context(|| "Failed to extract config from figment")?;

        Ok(config)
    }

    /// Load configuration from file or fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => Ok(Self::default()),
        }
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Deserialize a module's section of the configuration bag, falling back
    /// to the module's defaults when no section is present.
    pub fn module_config<T>(&self, module_name: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        match self.modules.get(module_name) {
            Some(value) => serde_json::from_value(value.clone())
                .with_context(|| format!("Invalid config for module '{module_name}'")),
            None => Ok(T::default()),
        }
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.port = port;
        }

        let logging = self.logging.get_or_insert_with(LoggingConfig::default);
        match args.verbose {
            0 => {}
            1 => logging.level = "debug".to_string(),
            _ => logging.level = "trace".to_string(),
        }
    }
}

/// Command line arguments structure.
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub config: Option<String>,
    pub port: Option<u16>,
    pub print_config: bool,
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn default_config_structure() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8084);
        assert_eq!(config.server.timeout_sec, 0);
        assert_eq!(config.superapp.namespace, "superapp");

        let logging = config.logging.as_ref().unwrap();
        assert_eq!(logging.level, "info");
        assert!(!logging.json);

        assert!(config.modules.is_empty());
    }

    #[test]
    fn load_layered_parses_all_sections() {
        let tmp = tempdir().unwrap();
        let cfg_path = tmp.path().join("cfg.yaml");

        let yaml = r#"
server:
  host: "0.0.0.0"
  port: 9090
  timeout_sec: 30

superapp:
  namespace: "2024b.demo"

logging:
  level: debug
  json: true

modules:
  commands:
    queue_capacity: 128
    workers: 4
"#;
        fs::write(&cfg_path, yaml).unwrap();

        let config = AppConfig::load_layered(&cfg_path).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.timeout_sec, 30);
        assert_eq!(config.superapp.namespace, "2024b.demo");

        let logging = config.logging.as_ref().unwrap();
        assert_eq!(logging.level, "debug");
        assert!(logging.json);

        let commands = &config.modules["commands"];
        assert_eq!(commands["queue_capacity"], 128);
        assert_eq!(commands["workers"], 4);
    }

    #[test]
    fn minimal_yaml_leaves_optionals_unset() {
        let tmp = tempdir().unwrap();
        let cfg_path = tmp.path().join("cfg.yaml");

        let yaml = r#"
server:
  host: "localhost"
  port: 8080
"#;
        fs::write(&cfg_path, yaml).unwrap();

        let config = AppConfig::load_layered(&cfg_path).unwrap();

        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 8080);
        // superapp falls back to its default namespace
        assert_eq!(config.superapp.namespace, "superapp");
        assert!(config.logging.is_none());
        assert!(config.modules.is_empty());
    }

    #[test]
    fn module_config_falls_back_to_defaults() {
        #[derive(Debug, Default, Deserialize)]
        struct Probe {
            #[serde(default)]
            knob: u32,
        }

        let mut config = AppConfig::default();
        let probe: Probe = config.module_config("absent").unwrap();
        assert_eq!(probe.knob, 0);

        config
            .modules
            .insert("absent".to_string(), serde_json::json!({ "knob": 7 }));
        let probe: Probe = config.module_config("absent").unwrap();
        assert_eq!(probe.knob, 7);
    }

    #[test]
    fn cli_overrides() {
        let mut config = AppConfig::default();

        let args = CliArgs {
            config: None,
            port: Some(3000),
            print_config: false,
            verbose: 2,
        };

        config.apply_cli_overrides(&args);

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.as_ref().unwrap().level, "trace");
    }

    #[test]
    fn cli_verbose_levels_matrix() {
        for (verbose, expected) in [(0u8, "info"), (1, "debug"), (2, "trace"), (3, "trace")] {
            let mut config = AppConfig::default();
            let args = CliArgs {
                config: None,
                port: None,
                print_config: false,
                verbose,
            };

            config.apply_cli_overrides(&args);
            assert_eq!(config.logging.as_ref().unwrap().level, expected);
        }
    }

    #[test]
    fn to_yaml_roundtrip_basic() {
        let config = AppConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("server:"));
        assert!(yaml.contains("superapp:"));

        let roundtrip: AppConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(roundtrip.server.port, config.server.port);
        assert_eq!(roundtrip.superapp.namespace, config.superapp.namespace);
    }

    #[test]
    fn invalid_yaml_missing_required_field() {
        // server.host is required once a server section is given
        let invalid_yaml = r#"
server:
  port: 8084
"#;

        let result: Result<AppConfig, _> = serde_yaml::from_str(invalid_yaml);
        assert!(result.is_err());
    }
}
