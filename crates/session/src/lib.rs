//! `retaildesk-session` — the authenticated-session lifecycle.
//!
//! One writer (the [`SessionManager`]), many readers (pages subscribing to
//! snapshots). The manager owns the bearer token on the HTTP adapter: the two
//! can never disagree about who is logged in.

pub mod error;
pub mod manager;
pub mod session;

pub use error::{LoginError, RegisterError, RoleUpdateError};
pub use manager::{RegisterRequest, SessionManager};
pub use session::{Session, SessionState};
