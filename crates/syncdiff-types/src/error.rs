//! Error types and handling for syncdiff
//!
//! Structured error types with severity levels covering every layer of the
//! workspace: snapshot construction, filtering, diff computation, sync path
//! configuration, and the transport boundary.

/// Error severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Low severity - operation can continue
    Low,
    /// Medium severity - operation should be retried
    Medium,
    /// High severity - operation should be aborted
    High,
}

/// Main error type for syncdiff operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        /// Error message from the I/O operation
        message: String,
    },

    /// Snapshot construction failed
    #[error("Snapshot error: {message}")]
    Snapshot {
        /// Error message describing the snapshot issue
        message: String,
    },

    /// Filter evaluation or compilation failed
    #[error("Filter error: {message}")]
    Filter {
        /// Error message describing the filter issue
        message: String,
    },

    /// Diff computation failed
    #[error("Diff error: {message}")]
    Diff {
        /// Error message describing the diff issue
        message: String,
    },

    /// Sync path configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Transport boundary error
    #[error("Transport error: {message}")]
    Transport {
        /// Error message describing the transport issue
        message: String,
    },

    /// Operation cancelled
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic error with custom message
    #[error("{message}")]
    Other {
        /// Custom error message
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// I/O related errors
    Io,
    /// Snapshot errors
    Snapshot,
    /// Filter errors
    Filter,
    /// Diff errors
    Diff,
    /// Configuration errors
    Config,
    /// Transport errors
    Transport,
    /// Cancellation
    Cancelled,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::Snapshot { .. } => ErrorKind::Snapshot,
            Self::Filter { .. } => ErrorKind::Filter,
            Self::Diff { .. } => ErrorKind::Diff,
            Self::Config { .. } => ErrorKind::Config,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Other { .. } => ErrorKind::Other,
        }
    }

    /// Get the error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Io { .. } => ErrorSeverity::Medium,
            Self::Snapshot { .. } => ErrorSeverity::Medium,
            Self::Filter { .. } => ErrorSeverity::High,
            Self::Diff { .. } => ErrorSeverity::High,
            Self::Config { .. } => ErrorSeverity::High,
            Self::Transport { .. } => ErrorSeverity::Medium,
            Self::Cancelled => ErrorSeverity::Low,
            Self::Other { .. } => ErrorSeverity::Medium,
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io { message } => {
                message.contains("Interrupted")
                    || message.contains("WouldBlock")
                    || message.contains("TimedOut")
            }
            Self::Snapshot { .. } | Self::Transport { .. } | Self::Other { .. } => true,
            Self::Filter { .. } | Self::Diff { .. } | Self::Config { .. } | Self::Cancelled => {
                false
            }
        }
    }

    /// Create a new filter error
    pub fn filter<S: Into<String>>(message: S) -> Self {
        Self::Filter {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}
