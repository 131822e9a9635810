//! Error types for boltrun operations.
//!
//! This module defines [`BoltrunError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Workflow failures (`ConnectionError`, `SessionError`, `StatementError`,
//!   `CollectionError`) wrap the driver's [`DriverError`] and are never
//!   recovered locally; they abort the workflow and reach the caller
//! - Configuration problems get their own variants so commands can print
//!   targeted messages
//! - Use `anyhow::Error` (via `BoltrunError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::graph::DriverError;

/// Core error type for boltrun operations.
#[derive(Debug, Error)]
pub enum BoltrunError {
    /// Endpoint unreachable or credentials rejected.
    #[error("Failed to connect to {uri}: {cause}")]
    ConnectionError { uri: String, cause: DriverError },

    /// The target database could not be opened.
    #[error("Failed to open session on database '{database}': {cause}")]
    SessionError {
        database: String,
        cause: DriverError,
    },

    /// A statement in the sequence failed remotely. `index` is zero-based.
    #[error("Statement {index} failed: {cause}")]
    StatementError { index: usize, cause: DriverError },

    /// Materializing the final result set was interrupted.
    #[error("Failed to collect results: {cause}")]
    CollectionError { cause: DriverError },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Requested workflow is not defined.
    #[error("Unknown workflow: {name}")]
    UnknownWorkflow { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoltrunError {
    /// Whether this error came from the remote side of a workflow run.
    pub fn is_workflow_failure(&self) -> bool {
        matches!(
            self,
            Self::ConnectionError { .. }
                | Self::SessionError { .. }
                | Self::StatementError { .. }
                | Self::CollectionError { .. }
        )
    }
}

/// Result type alias for boltrun operations.
pub type Result<T> = std::result::Result<T, BoltrunError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_error_displays_uri_and_cause() {
        let err = BoltrunError::ConnectionError {
            uri: "bolt://db:7687".into(),
            cause: DriverError::new("connection refused"),
        };
        let msg = err.to_string();
        assert!(msg.contains("bolt://db:7687"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn session_error_displays_database() {
        let err = BoltrunError::SessionError {
            database: "nope".into(),
            cause: DriverError::new("graph not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("'nope'"));
        assert!(msg.contains("graph not found"));
    }

    #[test]
    fn statement_error_displays_index() {
        let err = BoltrunError::StatementError {
            index: 1,
            cause: DriverError::new("syntax error"),
        };
        assert_eq!(err.to_string(), "Statement 1 failed: syntax error");
    }

    #[test]
    fn collection_error_displays_cause() {
        let err = BoltrunError::CollectionError {
            cause: DriverError::new("stream reset"),
        };
        assert!(err.to_string().contains("stream reset"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = BoltrunError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn unknown_workflow_displays_name() {
        let err = BoltrunError::UnknownWorkflow {
            name: "missing".into(),
        };
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn workflow_failures_are_classified() {
        let err = BoltrunError::CollectionError {
            cause: DriverError::new("x"),
        };
        assert!(err.is_workflow_failure());

        let err = BoltrunError::ConfigValidationError {
            message: "x".into(),
        };
        assert!(!err.is_workflow_failure());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: BoltrunError = io_err.into();
        assert!(matches!(err, BoltrunError::Io(_)));
    }
}
