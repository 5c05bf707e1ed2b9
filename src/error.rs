//! src/error.rs
//! ============================================================================
//! # AppError: Unified Error Type for the Admin Console
//!
//! This module defines the error enum (`AppError`) used across the entire
//! application. Each variant carries context for diagnostics, and all major
//! modules use `Result<T, AppError>` for consistency.
//!
//! Taxonomy, in order of where errors are caught:
//! - `Validation` is raised *before* any request is issued and never touches
//!   network or cache state.
//! - `Transport` / `Http` come back from the REST collaborator and are
//!   surfaced as notifications; cache and selection state stay untouched.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for all console operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Network-level failure (unreachable host, timeout, broken body).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `detail` is the server-supplied `detail` field when
    /// the body parsed as JSON, otherwise a generic status-code message.
    #[error("{detail}")]
    Http { status: u16, detail: String },

    /// Client-side validation failure, caught before any request is issued.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML config parsing error.
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file I/O error with path.
    #[error("failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Async task failure or channel error.
    #[error("task failed: {0}")]
    Task(String),

    /// Any other error, with description.
    #[error("unexpected error: {0}")]
    Other(String),
}

impl AppError {
    /// Shorthand for a validation failure.
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// Whether retrying the same action could succeed. Validation errors
    /// need different input, everything else is transient from the UI's
    /// point of view.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, AppError::Validation(_))
    }
}

// Allow conversion from `anyhow::Error` as fallback.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Other(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_displays_server_detail() {
        let err = AppError::Http {
            status: 422,
            detail: "question must not be empty".into(),
        };
        assert_eq!(err.to_string(), "question must not be empty");
    }

    #[test]
    fn validation_is_not_retryable() {
        assert!(!AppError::validation("answer is required").is_retryable());
        assert!(
            AppError::Http {
                status: 500,
                detail: "request failed with status 500".into()
            }
            .is_retryable()
        );
    }
}
