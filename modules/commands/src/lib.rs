//! Command dispatch service: validated mini-app command invocation with a
//! pluggable handler registry and an optional fire-and-continue queue.
//!
//! Mini-apps plug in as [`contract::handler::MiniAppHandler`] implementations
//! registered by name; commands against unregistered mini-apps are persisted
//! and acknowledged rather than rejected.

pub mod api;
pub mod config;
pub mod contract;
pub mod domain;
pub mod infra;
