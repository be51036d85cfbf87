//! Reconciliation plan model
//!
//! The plan is the engine's only output. Each entry records the decision
//! for one path together with the rule that produced it, so conflict-policy
//! application stays auditable all the way to the client. Sentinel-bearing
//! paths are surfaced separately in `skipped` rather than silently dropped.

use serde::{Deserialize, Serialize};

/// Direction of a create or update action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    /// Client content replaces or creates the server copy
    Upload,
    /// Server content replaces or creates the client copy
    Download,
}

/// Divergence that cannot be mechanically reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictKind {
    /// One side has a file, the other a directory
    TypeMismatch,
    /// One side deleted the path while the other still carries it
    DeleteVsRecreate,
}

/// The rule that produced a plan decision
///
/// Recorded on every entry so the configured conflict policy's application
/// can be audited after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppliedRule {
    /// Path was seeded during the initial sync of a fresh sync path
    FirstSyncSeed,
    /// Path was simply absent from the other side
    MissingPeer,
    /// Most-recent-wins policy picked the side with the newer mtime
    MostRecentWins,
    /// Most-recent-wins policy hit an mtime tie and fell back to the
    /// client side
    MostRecentTie,
    /// Prefer-local policy picked the client side
    PreferLocal,
    /// Prefer-remote policy picked the server side
    PreferRemote,
    /// No policy applies; the conflict needs explicit resolution
    ManualResolution,
}

/// What the plan decided for one path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanDecision {
    /// Execute a create/update in the given direction
    Action(SyncAction),
    /// Surface a conflict; never executed silently
    Conflict(ConflictKind),
}

/// One path's reconciliation decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    /// Relative path, in the spelling stored by the originating snapshot
    pub path: String,
    /// Decision for the path
    pub decision: PlanDecision,
    /// Rule that produced the decision
    pub rule: AppliedRule,
}

impl PlanEntry {
    /// Construct an action entry
    pub fn action(path: impl Into<String>, action: SyncAction, rule: AppliedRule) -> Self {
        Self {
            path: path.into(),
            decision: PlanDecision::Action(action),
            rule,
        }
    }

    /// Construct a conflict entry
    pub fn conflict(path: impl Into<String>, kind: ConflictKind) -> Self {
        Self {
            path: path.into(),
            decision: PlanDecision::Conflict(kind),
            rule: AppliedRule::ManualResolution,
        }
    }

    /// Whether this entry surfaces a conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self.decision, PlanDecision::Conflict(_))
    }
}

/// Why a path was left out of the actionable plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipReason {
    /// Excluded by the filter engine
    Filtered,
    /// Could not be stat'd; carries the recorded message
    Error(String),
}

/// A path skipped because a sentinel stood in for its stat data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedPath {
    /// Relative path
    pub path: String,
    /// Reason the path was skipped
    pub reason: SkipReason,
}

/// The complete output of one diff computation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationPlan {
    /// Actionable decisions and conflicts, one per diverging path
    pub entries: Vec<PlanEntry>,
    /// Sentinel-bearing paths surfaced for visibility
    pub skipped: Vec<SkippedPath>,
}

impl ReconciliationPlan {
    /// Create an empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the plan contains no actions or conflicts
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over conflict entries only
    pub fn conflicts(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|e| e.is_conflict())
    }

    /// Look up the entry for a path, if any
    pub fn entry(&self, path: &str) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_constructors() {
        let action = PlanEntry::action("a.txt", SyncAction::Upload, AppliedRule::MissingPeer);
        assert!(!action.is_conflict());

        let conflict = PlanEntry::conflict("b.txt", ConflictKind::TypeMismatch);
        assert!(conflict.is_conflict());
        assert_eq!(conflict.rule, AppliedRule::ManualResolution);
    }

    #[test]
    fn test_plan_accessors() {
        let mut plan = ReconciliationPlan::new();
        assert!(plan.is_empty());

        plan.entries.push(PlanEntry::action(
            "a.txt",
            SyncAction::Download,
            AppliedRule::MissingPeer,
        ));
        plan.entries
            .push(PlanEntry::conflict("b.txt", ConflictKind::DeleteVsRecreate));

        assert!(!plan.is_empty());
        assert_eq!(plan.conflicts().count(), 1);
        assert!(plan.entry("a.txt").is_some());
        assert!(plan.entry("c.txt").is_none());
    }

    #[test]
    fn test_entry_wire_shape() {
        let entry = PlanEntry::action("a.txt", SyncAction::Upload, AppliedRule::MostRecentWins);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["path"], "a.txt");
        assert_eq!(json["decision"]["action"], "upload");
        assert_eq!(json["rule"], "most-recent-wins");
    }
}
