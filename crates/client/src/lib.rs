//! `retaildesk-client` — HTTP client adapter for the backend REST API.
//!
//! One base URL per client, cookies forwarded for session continuity, and a
//! mutable default bearer header owned by the session layer. No retry and no
//! caching: callers own those policies.

pub mod client;
pub mod config;
pub mod error;

pub use client::ApiClient;
pub use config::{ApiConfig, Mode};
pub use error::ApiError;
