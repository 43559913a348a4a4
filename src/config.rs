//! Environment configuration
//!
//! Reads the test environment from process environment variables (plus an
//! optional `.env` file) into an immutable, explicitly-injected config.
//! Construction is fail-fast: a missing required variable aborts before any
//! test runs, naming the offending variable.
//!
//! ## Required variables
//!
//! | Variable | Purpose |
//! |----------|---------|
//! | `BASE_URL` | Web application root |
//! | `API_BASE_URL` | REST API root |
//! | `USER_EMAIL` | Default login identifier |
//! | `USER_PASSWORD` | Default login secret |
//! | `API_BEARER_TOKEN` | Static bearer token for privileged calls |
//! | `DEFAULT_TIMEOUT` | Optional, request timeout in ms (default 30000) |

use std::time::Duration;

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{ProbeError, Result};

/// Default request timeout when `DEFAULT_TIMEOUT` is not set (30 seconds)
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Login credentials for the default test user
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Immutable environment configuration
///
/// Built once at process start and passed down to every component that
/// needs it. There is deliberately no global singleton; tests construct
/// one and share it by cloning.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EnvConfig {
    /// Web application root for UI navigation
    pub base_url: String,
    /// REST API root for service calls
    pub api_base_url: String,
    /// Default request timeout in milliseconds
    pub default_timeout_ms: u64,
    /// Default test user credentials
    pub credentials: Credentials,
    /// Static bearer token for privileged API calls
    pub api_bearer_token: String,
}

impl EnvConfig {
    /// Load `.env` (if present) and build the config from the environment.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    /// Build the config from already-set environment variables.
    ///
    /// Fails with a [`ProbeError::Config`] naming the first missing
    /// required variable.
    pub fn from_env() -> Result<Self> {
        let default_timeout_ms = match std::env::var("DEFAULT_TIMEOUT") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| ProbeError::Config {
                reason: format!("DEFAULT_TIMEOUT must be an integer (ms), got '{}'", raw),
            })?,
            Err(_) => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            base_url: required_env("BASE_URL")?,
            api_base_url: required_env("API_BASE_URL")?,
            default_timeout_ms,
            credentials: Credentials {
                email: required_env("USER_EMAIL")?,
                password: required_env("USER_PASSWORD")?,
            },
            api_bearer_token: required_env("API_BEARER_TOKEN")?,
        })
    }

    /// Default request timeout as a [`Duration`]
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    /// Dotted-path lookup for parameterized test code.
    ///
    /// Boundary adapter over the typed fields; prefer direct field access
    /// in Rust code. Paths mirror the original camelCase configuration
    /// keys, e.g. `credentials.email` or `apiBaseUrl`.
    pub fn get(&self, key: &str) -> Result<Value> {
        let value = match key {
            "baseUrl" => json!(self.base_url),
            "apiBaseUrl" => json!(self.api_base_url),
            "defaultTimeout" => json!(self.default_timeout_ms),
            "apiBearerToken" => json!(self.api_bearer_token),
            "credentials" => json!({
                "email": self.credentials.email,
                "password": self.credentials.password,
            }),
            "credentials.email" => json!(self.credentials.email),
            "credentials.password" => json!(self.credentials.password),
            _ => {
                return Err(ProbeError::ConfigKeyNotFound {
                    key: key.to_string(),
                })
            }
        };
        Ok(value)
    }
}

fn required_env(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ProbeError::Config {
            reason: format!("Required environment variable {} is missing", key),
        }),
    }
}
