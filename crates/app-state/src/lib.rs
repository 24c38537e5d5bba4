//! Application state for Showcase
//!
//! This crate holds the process-wide state installed once at startup and the
//! typed role sets read from the identity provider's metadata bag.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod roles;
pub mod runtime;

pub use roles::{Role, RoleError, RoleSet, CURRENT_ROLES_VERSION};
pub use runtime::{InitOnce, RuntimeError, RuntimeInfo};
