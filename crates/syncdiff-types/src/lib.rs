//! Core type system and error handling for syncdiff
//!
//! This crate provides the foundational types shared across the syncdiff
//! workspace:
//!
//! - **Error handling**: Structured error types with severity levels
//! - **Stat model**: Per-path stat tuples and the sentinel entries used for
//!   filtered or unreadable paths
//! - **Protocol constants**: Fixed wire-level markers (checksum algorithm,
//!   diff-complete sentinel, agent identification, partial-upload prefix)
//!
//! # Examples
//!
//! ```rust
//! use syncdiff_types::{FileStat, SnapshotEntry};
//!
//! let stat = FileStat::file(1024, 1_700_000_000_000, 42);
//! let entry = SnapshotEntry::Stat(stat);
//! assert!(!entry.is_sentinel());
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod modes;
pub mod protocol;
pub mod result;
pub mod stat;

pub use error::{Error, ErrorKind, ErrorSeverity};
pub use modes::{ConflictPolicy, DiffMode, ScheduleUnit, SyncMode};
pub use protocol::{
    is_partial_upload, AGENT_STRING, CHECKSUM_ALGORITHM, DIFF_COMPLETE, PARTIAL_UPLOAD_PREFIX,
    PROTOCOL_VERSION,
};
pub use result::Result;
pub use stat::{FileStat, SnapshotEntry};
