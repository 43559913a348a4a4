//! Error types with fix suggestions

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProbeError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    #[error("Config key '{key}' not found")]
    ConfigKeyNotFound { key: String },

    #[error("Failed to parse response: {details}")]
    Parse { details: String },

    #[error("Schema validation failed: {details}")]
    SchemaFailed { details: String },

    #[error("API {method} request to '{endpoint}' failed: {status}")]
    UnexpectedStatus {
        method: String,
        endpoint: String,
        status: String,
    },

    #[error("Expected status {expected}, got {actual}")]
    StatusMismatch { expected: String, actual: u16 },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FixSuggestion for ProbeError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ProbeError::Config { .. } => {
                Some("Check your .env file: BASE_URL, API_BASE_URL, USER_EMAIL, USER_PASSWORD, API_BEARER_TOKEN")
            }
            ProbeError::ConfigKeyNotFound { .. } => {
                Some("Use a dotted path that exists, e.g. 'credentials.email' or 'apiBaseUrl'")
            }
            ProbeError::Parse { .. } => {
                Some("The endpoint declared JSON but returned something else; inspect the raw body")
            }
            ProbeError::SchemaFailed { .. } => {
                Some("Compare the response body against the declared schema fields")
            }
            ProbeError::StatusMismatch { .. } => {
                Some("Check the endpoint behavior or adjust the expected status in the test")
            }
            ProbeError::UnexpectedStatus { .. } => {
                Some("Pass ignore_errors to inspect the error body instead of failing")
            }
            ProbeError::Http(_) => Some("Check network connectivity and the configured base URL"),
            ProbeError::Io(_) => Some("Check file path and permissions"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_names_method_endpoint_and_status() {
        let err = ProbeError::UnexpectedStatus {
            method: "POST".to_string(),
            endpoint: "/login".to_string(),
            status: "401 Unauthorized".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("POST"));
        assert!(msg.contains("/login"));
        assert!(msg.contains("401 Unauthorized"));
    }

    #[test]
    fn every_variant_has_a_fix_suggestion() {
        let err = ProbeError::Config {
            reason: "missing".to_string(),
        };
        assert!(err.fix_suggestion().is_some());

        let err = ProbeError::SchemaFailed {
            details: "bad".to_string(),
        };
        assert!(err.fix_suggestion().is_some());

        let err = ProbeError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.fix_suggestion().is_some());
    }
}
