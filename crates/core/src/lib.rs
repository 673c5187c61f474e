//! `retaildesk-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no network concerns).

pub mod error;
pub mod sanitize;

pub use error::{DomainError, DomainResult};
pub use sanitize::escape_html;
