//! Error types for sync path configuration

use syncdiff_types::Error as SyncdiffError;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    Validation {
        /// Validation error message
        message: String,
    },

    /// Invalid configuration value
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key
        key: String,
        /// Error message
        message: String,
    },

    /// Referenced sync path does not exist
    #[error("Unknown sync path id {id}")]
    UnknownId {
        /// Identifier that was not found
        id: u64,
    },

    /// A create carried an id, or an update did not
    #[error("Sync path id error: {message}")]
    IdMismatch {
        /// Error message
        message: String,
    },

    /// Optimistic concurrency check failed
    #[error("Stale sync path update: expected timestamp {expected}, got {provided}")]
    Conflict {
        /// Timestamp currently stored
        expected: i64,
        /// Timestamp the caller presented
        provided: i64,
    },
}

impl ConfigError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new invalid value error
    pub fn invalid_value<S: Into<String>>(key: S, message: S) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<ConfigError> for SyncdiffError {
    fn from(error: ConfigError) -> Self {
        SyncdiffError::config(error.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
