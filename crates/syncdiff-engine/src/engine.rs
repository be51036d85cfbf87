//! The diff computation
//!
//! One pass over the union of both snapshots. Paths meet across Unicode
//! normalization forms because snapshot lookups go through the normalized
//! path map, so an NFD spelling on one side finds its NFC twin on the
//! other.
//!
//! The engine never errors for data-level conditions: filtered entries,
//! stat errors, and missing paths are all representable in the plan.
//! Malformed payloads are rejected earlier, at the transport boundary.

use crate::plan::{
    AppliedRule, ConflictKind, PlanEntry, ReconciliationPlan, SkipReason, SkippedPath, SyncAction,
};
use std::collections::HashSet;
use syncdiff_snapshot::Snapshot;
use syncdiff_types::{ConflictPolicy, FileStat, SnapshotEntry};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

/// Options steering one diff computation
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Compare content checksums instead of size and mtime
    pub secure: bool,
    /// Initial reconciliation of a freshly registered sync path; suppresses
    /// the delete and conflict heuristics that assume a prior baseline
    pub first_sync: bool,
    /// Direction rule applied when both sides changed
    pub policy: ConflictPolicy,
    /// Paths the client deleted since its baseline; a deletion signal, not
    /// part of the snapshot. Ignored on first sync.
    pub client_deletes: Vec<String>,
}

impl DiffOptions {
    /// Create options with the given comparison mode
    pub fn new(secure: bool) -> Self {
        Self {
            secure,
            first_sync: false,
            policy: ConflictPolicy::default(),
            client_deletes: Vec::new(),
        }
    }

    /// Fast-mode options for an initial sync
    pub fn first_sync() -> Self {
        Self {
            first_sync: true,
            ..Self::new(false)
        }
    }

    /// Set the first-sync flag
    pub fn with_first_sync(mut self, first_sync: bool) -> Self {
        self.first_sync = first_sync;
        self
    }

    /// Set the conflict policy
    pub fn with_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attach the client's deletion signals
    pub fn with_client_deletes(mut self, deletes: Vec<String>) -> Self {
        self.client_deletes = deletes;
        self
    }
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Compare a client and a server snapshot and produce a reconciliation plan
///
/// Pure function of its inputs: no filesystem access, no shared state, no
/// side effects. Identical snapshots yield an empty plan in both modes.
pub fn compute_diff(
    client: &Snapshot,
    server: &Snapshot,
    options: &DiffOptions,
) -> ReconciliationPlan {
    let mut plan = ReconciliationPlan::new();

    // deletion signals only mean something against an established baseline
    let deletes: HashSet<String> = if options.first_sync {
        HashSet::new()
    } else {
        options
            .client_deletes
            .iter()
            .map(|p| p.nfc().collect())
            .collect()
    };

    let create_rule = if options.first_sync {
        AppliedRule::FirstSyncSeed
    } else {
        AppliedRule::MissingPeer
    };

    for (path, client_entry) in client.iter() {
        let client_stat = match client_entry {
            SnapshotEntry::Stat(stat) => stat,
            SnapshotEntry::Filtered => {
                plan.skipped.push(SkippedPath {
                    path: path.clone(),
                    reason: SkipReason::Filtered,
                });
                continue;
            }
            SnapshotEntry::Error(message) => {
                plan.skipped.push(SkippedPath {
                    path: path.clone(),
                    reason: SkipReason::Error(message.clone()),
                });
                continue;
            }
        };

        match server.get(path) {
            None => {
                plan.entries
                    .push(PlanEntry::action(path, SyncAction::Upload, create_rule));
            }
            Some(SnapshotEntry::Filtered) => {
                plan.skipped.push(SkippedPath {
                    path: path.clone(),
                    reason: SkipReason::Filtered,
                });
            }
            Some(SnapshotEntry::Error(message)) => {
                plan.skipped.push(SkippedPath {
                    path: path.clone(),
                    reason: SkipReason::Error(message.clone()),
                });
            }
            Some(SnapshotEntry::Stat(server_stat)) => {
                diff_pair(path, client_stat, server_stat, options, &mut plan);
            }
        }
    }

    for (path, server_entry) in server.iter() {
        if client.contains(path) {
            continue;
        }

        match server_entry {
            SnapshotEntry::Filtered => {
                plan.skipped.push(SkippedPath {
                    path: path.clone(),
                    reason: SkipReason::Filtered,
                });
            }
            SnapshotEntry::Error(message) => {
                plan.skipped.push(SkippedPath {
                    path: path.clone(),
                    reason: SkipReason::Error(message.clone()),
                });
            }
            SnapshotEntry::Stat(_) => {
                let nfc_path: String = path.nfc().collect();
                if deletes.contains(&nfc_path) {
                    // never a silent delete
                    plan.entries
                        .push(PlanEntry::conflict(path, ConflictKind::DeleteVsRecreate));
                } else {
                    plan.entries
                        .push(PlanEntry::action(path, SyncAction::Download, create_rule));
                }
            }
        }
    }

    debug!(
        "diff complete: {} entries, {} skipped (secure={}, first_sync={})",
        plan.entries.len(),
        plan.skipped.len(),
        options.secure,
        options.first_sync
    );
    plan
}

/// Compare two real stat tuples for the same path
fn diff_pair(
    path: &str,
    client: &FileStat,
    server: &FileStat,
    options: &DiffOptions,
    plan: &mut ReconciliationPlan,
) {
    // type mismatch is always a conflict, never silently resolved
    if client.is_dir != server.is_dir {
        plan.entries
            .push(PlanEntry::conflict(path, ConflictKind::TypeMismatch));
        return;
    }

    // presence alone suffices for directories; children reconcile through
    // their own snapshot entries
    if client.is_dir {
        return;
    }

    let changed = if options.secure {
        client.checksum != server.checksum
    } else {
        client.size != server.size || client.mtime != server.mtime
    };

    if changed {
        let (action, rule) = resolve_update(options.policy, client, server);
        plan.entries.push(PlanEntry::action(path, action, rule));
    }
}

/// Apply the configured conflict policy to a changed file pair
fn resolve_update(
    policy: ConflictPolicy,
    client: &FileStat,
    server: &FileStat,
) -> (SyncAction, AppliedRule) {
    match policy {
        ConflictPolicy::MostRecentWins => {
            if client.mtime > server.mtime {
                (SyncAction::Upload, AppliedRule::MostRecentWins)
            } else if server.mtime > client.mtime {
                (SyncAction::Download, AppliedRule::MostRecentWins)
            } else {
                // equal mtimes cannot pick a winner; fall back to the
                // client side and record the tie
                (SyncAction::Upload, AppliedRule::MostRecentTie)
            }
        }
        ConflictPolicy::PreferLocal => (SyncAction::Upload, AppliedRule::PreferLocal),
        ConflictPolicy::PreferRemote => (SyncAction::Download, AppliedRule::PreferRemote),
    }
}
