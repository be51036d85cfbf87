//! Snapshot diff and conflict classification engine for syncdiff
//!
//! Given a client-submitted snapshot and a server-side snapshot, the engine
//! produces a [`ReconciliationPlan`]: per-path create/update actions plus
//! conflict entries for divergence that cannot be mechanically reconciled.
//! The computation is a pure, synchronous function of its two inputs and
//! options; it holds no state between calls and never touches the
//! filesystem, so concurrent invocations for different sync sessions need
//! no coordination and cancellation is simply dropping the result.
//!
//! # Examples
//!
//! ```rust
//! use syncdiff_engine::{compute_diff, DiffOptions};
//! use syncdiff_snapshot::Snapshot;
//! use syncdiff_types::{FileStat, SnapshotEntry};
//!
//! let mut client = Snapshot::new();
//! client.insert("a.txt".to_string(), SnapshotEntry::Stat(FileStat::file(100, 1000, 5)));
//! let server = Snapshot::new();
//!
//! let plan = compute_diff(&client, &server, &DiffOptions::first_sync());
//! assert_eq!(plan.entries.len(), 1);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod engine;
pub mod plan;

pub use engine::{compute_diff, DiffOptions};
pub use plan::{
    AppliedRule, ConflictKind, PlanDecision, PlanEntry, ReconciliationPlan, SkipReason,
    SkippedPath, SyncAction,
};
