//! Error types for the transport boundary

use syncdiff_types::Error as SyncdiffError;
use thiserror::Error;

/// Transport boundary error type
///
/// All variants are client errors: the request was malformed before any
/// diff work started.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Request body declared gzip but could not be decompressed
    #[error("invalid gzip body: {message}")]
    InvalidGzip {
        /// Underlying decompression error
        message: String,
    },

    /// Request body was not valid JSON after (optional) decompression
    #[error("invalid JSON body: {message}")]
    InvalidJson {
        /// Underlying parse error
        message: String,
    },

    /// Decompressed body exceeded the configured size limit
    #[error("request body exceeds {limit} bytes after decompression")]
    BodyTooLarge {
        /// Size limit in bytes
        limit: u64,
    },

    /// Response serialization failed
    #[error("failed to encode response: {message}")]
    Encode {
        /// Underlying serialization or write error
        message: String,
    },
}

impl From<TransportError> for SyncdiffError {
    fn from(error: TransportError) -> Self {
        SyncdiffError::transport(error.to_string())
    }
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
