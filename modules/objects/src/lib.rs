//! Object graph service: domain object lifecycle and the parent/child
//! binding graph.
//!
//! Objects are addressed by `(namespace, id)` and linked by directed
//! parent→child edges owned by the repository. Every mutation is gated by the
//! platform access policy with the caller resolved through the users
//! contract client.

pub mod api;
pub mod contract;
pub mod domain;
pub mod gateways;
pub mod infra;
