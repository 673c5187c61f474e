//! Base-URL selection.
//!
//! This is configuration, not logic: exactly one base URL per client, picked
//! by build mode with an environment override for deployments that need it.

use std::env;

const DEV_BASE_URL: &str = "http://localhost:3000/api";
const PROD_BASE_URL: &str = "https://api.retaildesk.id/api";

/// Environment variable that overrides the mode-selected base URL.
pub const BASE_URL_ENV: &str = "RETAILDESK_API_URL";

/// Build/runtime mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    /// Mode implied by the build profile.
    pub fn current() -> Mode {
        if cfg!(debug_assertions) {
            Mode::Development
        } else {
            Mode::Production
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Mode::Development => DEV_BASE_URL,
            Mode::Production => PROD_BASE_URL,
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        // Paths are joined verbatim; a trailing slash would double up.
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn for_mode(mode: Mode) -> Self {
        Self::new(mode.base_url())
    }

    /// Mode-selected config, with `RETAILDESK_API_URL` taking precedence.
    pub fn from_env() -> Self {
        match env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::for_mode(Mode::current()),
        }
    }
}
