//! Application runtime support: layered configuration and logging bootstrap.

pub mod config;
pub mod logging;

pub use config::{AppConfig, CliArgs, LoggingConfig, ServerConfig, SuperAppConfig};
