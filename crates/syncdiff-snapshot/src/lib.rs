//! Normalization-aware snapshot model and builder for syncdiff
//!
//! This crate provides the data structures a diff exchange operates on:
//!
//! - [`NormalizedPathMap`]: a path-keyed map whose lookups succeed for any
//!   Unicode normalization form of a stored key
//! - [`Snapshot`]: the path-to-stat mapping exchanged between client and
//!   server, with wire-level (de)serialization
//! - [`SnapshotBuilder`]: an async filesystem walk producing a server-side
//!   snapshot, applying filters and capturing per-path stat failures as
//!   inline sentinels
//!
//! # Examples
//!
//! ```rust
//! use syncdiff_snapshot::Snapshot;
//! use syncdiff_types::{FileStat, SnapshotEntry};
//!
//! let mut snapshot = Snapshot::new();
//! snapshot.insert("docs/a.txt".to_string(), SnapshotEntry::Stat(FileStat::file(10, 1000, 3)));
//! assert!(snapshot.get("docs/a.txt").is_some());
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod pathmap;
pub mod snapshot;

pub use builder::SnapshotBuilder;
pub use pathmap::NormalizedPathMap;
pub use snapshot::Snapshot;
