//! `retaildesk-auth` — pure authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and rendering: it knows
//! nothing about routes or requests, only about who a user is and what they
//! are allowed to do.

pub mod authorize;
pub mod permissions;
pub mod roles;
pub mod user;

pub use authorize::{AuthzError, authorize, can_access, can_manage_permissions, visible_features};
pub use permissions::{Action, Feature, PermissionMap};
pub use roles::Role;
pub use user::AuthenticatedUser;
