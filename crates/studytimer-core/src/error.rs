//! Core error types for studytimer-core.
//!
//! Timer errors are plain values returned from operations so a host can render
//! feedback without unwinding. Storage and configuration errors are wrapped by
//! [`CoreError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studytimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timer state machine rejected an operation
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors produced by the interval timer.
///
/// Neither variant leaves the timer partially modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// A duration was zero or out of range.
    #[error("Invalid timer configuration for '{field}': {message}")]
    InvalidConfig { field: String, message: String },

    /// The operation is not allowed in the current state.
    #[error("Cannot {operation} now: {reason}")]
    InvalidState {
        operation: &'static str,
        reason: &'static str,
    },
}

impl TimerError {
    pub(crate) fn invalid_config(field: &str, message: impl Into<String>) -> Self {
        TimerError::InvalidConfig {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Stored data could not be decoded
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _msg) => {
                if code.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_error_messages() {
        let err = TimerError::invalid_config("study_duration_secs", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid timer configuration for 'study_duration_secs': must be greater than zero"
        );

        let err = TimerError::InvalidState {
            operation: "apply preset",
            reason: "timer is running",
        };
        assert_eq!(err.to_string(), "Cannot apply preset now: timer is running");
    }

    #[test]
    fn timer_error_converts_into_core_error() {
        let core: CoreError = TimerError::invalid_config("minutes", "zero").into();
        assert!(matches!(core, CoreError::Timer(TimerError::InvalidConfig { .. })));
    }
}
