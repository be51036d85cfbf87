//! The decoded diff request body

use serde::{Deserialize, Serialize};
use syncdiff_engine::DiffOptions;
use syncdiff_filter::FilterSet;
use syncdiff_snapshot::Snapshot;
use syncdiff_types::{ConflictPolicy, Result};

/// One diff exchange as submitted by a sync client
///
/// `mtime` values inside the snapshot are epoch milliseconds; the unit is
/// fixed by the protocol, not negotiated or inferred.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffRequest {
    /// Compare content checksums instead of size and mtime
    #[serde(default)]
    pub secure_diff: bool,
    /// Initial reconciliation of a freshly registered sync path
    #[serde(default)]
    pub first_sync: bool,
    /// Default exclusion names, evaluated per path segment
    #[serde(default)]
    pub default_filters: Vec<String>,
    /// Optional path regular expression, compiled case-insensitively
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_filters: Option<String>,
    /// Paths the client deleted since its baseline
    #[serde(default)]
    pub client_deletes: Vec<String>,
    /// The client-side snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Snapshot>,
}

impl DiffRequest {
    /// Compile the request's exclusion rules into a [`FilterSet`]
    ///
    /// An invalid path regular expression is rejected here, before any
    /// server-side snapshot work starts.
    pub fn filter_set(&self) -> Result<FilterSet> {
        FilterSet::new(self.default_filters.iter().cloned())
            .with_path_filter(self.path_filters.as_deref())
    }

    /// Build engine options from the request flags and the sync path's
    /// configured conflict policy
    pub fn diff_options(&self, policy: ConflictPolicy) -> DiffOptions {
        DiffOptions::new(self.secure_diff)
            .with_policy(policy)
            .with_client_deletes(self.client_deletes.clone())
            .with_first_sync(self.first_sync)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_body_decodes_with_defaults() {
        let request: DiffRequest =
            serde_json::from_str(r#"{"secureDiff": false, "firstSync": true}"#).unwrap();

        assert!(!request.secure_diff);
        assert!(request.first_sync);
        assert!(request.default_filters.is_empty());
        assert!(request.path_filters.is_none());
        assert!(request.snapshot.is_none());
    }

    #[test]
    fn test_full_body_decodes() {
        let json = r#"{
            "secureDiff": true,
            "firstSync": false,
            "defaultFilters": [".DS_Store", "Thumbs.db"],
            "pathFilters": "\\.tmp$",
            "clientDeletes": ["old/report.pdf"],
            "snapshot": {"a.txt": [false, 100, 1000, 5, null]}
        }"#;

        let request: DiffRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.default_filters.len(), 2);
        assert_eq!(request.client_deletes, vec!["old/report.pdf"]);
        let snapshot = request.snapshot.unwrap();
        assert_eq!(snapshot.stat("a.txt").unwrap().size, 100);
    }

    #[test]
    fn test_filter_set_compiles() {
        let request: DiffRequest = serde_json::from_str(
            r#"{"defaultFilters": [".DS_Store"], "pathFilters": "cache"}"#,
        )
        .unwrap();

        let filters = request.filter_set().unwrap();
        assert!(filters.should_exclude("x/.DS_Store"));
        assert!(filters.should_exclude("a/CACHE/b"));
    }

    #[test]
    fn test_invalid_path_filter_rejected() {
        let request: DiffRequest =
            serde_json::from_str(r#"{"pathFilters": "(oops"}"#).unwrap();
        assert!(request.filter_set().is_err());
    }

    #[test]
    fn test_diff_options_carry_policy() {
        let request: DiffRequest = serde_json::from_str(
            r#"{"secureDiff": true, "firstSync": false, "clientDeletes": ["a"]}"#,
        )
        .unwrap();

        let options = request.diff_options(ConflictPolicy::PreferRemote);
        assert!(options.secure);
        assert!(!options.first_sync);
        assert_eq!(options.policy, ConflictPolicy::PreferRemote);
        assert_eq!(options.client_deletes, vec!["a"]);
    }
}
