//! Result type alias for syncdiff operations

use crate::Error;

/// Result type alias for syncdiff operations
pub type Result<T> = std::result::Result<T, Error>;
