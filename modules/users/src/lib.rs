//! User service: identities, roles, and the platform access policy.
//!
//! Other modules consume this crate through [`contract`] only: the models,
//! the [`contract::client::UsersApi`] trait, and the
//! [`contract::policy::AccessPolicy`] capability matrix.

pub mod api;
pub mod contract;
pub mod domain;
pub mod gateways;
pub mod infra;
