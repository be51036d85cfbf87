//! Sync path configuration model and registry for syncdiff
//!
//! A sync path pairs a client-local directory with a server-side location
//! and carries the synchronization policy for that pairing: direction,
//! diff mode, conflict policy, filters, and scheduler cadence. The model is
//! pure validated data; it is mutated only through explicit update calls
//! (never by the diff engine) and guarded against racing writers by a
//! timestamp-based optimistic concurrency check.
//!
//! # Examples
//!
//! ```rust
//! use syncdiff_config::{SyncPathConfig, SyncPathRegistry};
//!
//! let registry = SyncPathRegistry::new();
//! let config = SyncPathConfig::new("documents", "/home/me/docs", "/files/docs");
//! let registered = registry.register(config).unwrap();
//! assert!(registered.id.is_some());
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod registry;

pub use error::{ConfigError, ConfigResult};
pub use registry::SyncPathRegistry;

use serde::{Deserialize, Serialize};
use syncdiff_types::{ConflictPolicy, DiffMode, ScheduleUnit, SyncMode};

/// Scheduler cadence for a sync path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Scheduler {
    /// Cadence value, interpreted in `unit`s; 0 with `Disabled` when the
    /// client omits scheduling
    pub value: u32,
    /// Cadence unit
    pub unit: ScheduleUnit,
}

/// One configured synchronization pairing
///
/// `id` is absent on creation and assigned by the server; every subsequent
/// diff or operation call references the pairing by it. `timestamp` is the
/// optimistic-concurrency token: updates must present the stored value and
/// every successful mutation advances it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPathConfig {
    /// Server-assigned identifier; `None` until registered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Human-readable name
    pub name: String,
    /// Client-local directory
    pub local_path: String,
    /// Server-side location
    pub remote_path: String,
    /// Permissions string granted to the pairing
    #[serde(default)]
    pub permissions: String,
    /// Direction data moves in
    #[serde(default)]
    pub mode: SyncMode,
    /// Comparison mode for diffs
    #[serde(default)]
    pub diff_mode: DiffMode,
    /// Direction rule when both sides changed
    #[serde(default)]
    pub conflict_mode: ConflictPolicy,
    /// Exclusion filter entries (literal names or patterns)
    #[serde(default)]
    pub filters: Vec<String>,
    /// Automatic run cadence
    #[serde(default)]
    pub scheduler: Scheduler,
    /// Whether the pairing is active
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Completion time of the last sync, epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<i64>,
    /// Optimistic-concurrency token; monotonically increasing
    #[serde(default)]
    pub timestamp: i64,
}

fn default_enabled() -> bool {
    true
}

impl SyncPathConfig {
    /// Create a new, not-yet-registered sync path with defaults
    pub fn new(
        name: impl Into<String>,
        local_path: impl Into<String>,
        remote_path: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            local_path: local_path.into(),
            remote_path: remote_path.into(),
            permissions: String::new(),
            mode: SyncMode::default(),
            diff_mode: DiffMode::default(),
            conflict_mode: ConflictPolicy::default(),
            filters: Vec::new(),
            scheduler: Scheduler::default(),
            enabled: true,
            last_sync: None,
            timestamp: 0,
        }
    }

    /// Validate field-level constraints
    ///
    /// Called at the boundary before a create or update is accepted; a diff
    /// never runs against an invalid sync path.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid_value("name", "must not be empty"));
        }
        if self.local_path.trim().is_empty() {
            return Err(ConfigError::invalid_value("localPath", "must not be empty"));
        }
        if self.remote_path.trim().is_empty() {
            return Err(ConfigError::invalid_value("remotePath", "must not be empty"));
        }
        if self.scheduler.unit != ScheduleUnit::Disabled && self.scheduler.value == 0 {
            return Err(ConfigError::invalid_value(
                "scheduler",
                "cadence value must be positive when scheduling is enabled",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config_passes() {
        let config = SyncPathConfig::new("docs", "/home/me/docs", "/files/docs");
        assert!(config.validate().is_ok());
        assert!(config.enabled);
        assert_eq!(config.diff_mode, DiffMode::Secure);
    }

    #[test]
    fn test_empty_fields_rejected() {
        assert!(SyncPathConfig::new("", "/a", "/b").validate().is_err());
        assert!(SyncPathConfig::new("x", " ", "/b").validate().is_err());
        assert!(SyncPathConfig::new("x", "/a", "").validate().is_err());
    }

    #[test]
    fn test_enabled_scheduler_needs_positive_value() {
        let mut config = SyncPathConfig::new("docs", "/a", "/b");
        config.scheduler = Scheduler {
            value: 0,
            unit: ScheduleUnit::Hour,
        };
        assert!(config.validate().is_err());

        config.scheduler.value = 6;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "name": "docs",
            "localPath": "/home/me/docs",
            "remotePath": "/files/docs"
        }"#;

        let config: SyncPathConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.id, None);
        assert_eq!(config.mode, SyncMode::Both);
        assert_eq!(config.scheduler.unit, ScheduleUnit::Disabled);
        assert_eq!(config.scheduler.value, 0);
        assert!(config.enabled);
    }

    #[test]
    fn test_mode_fields_parse_case_insensitively() {
        let json = r#"{
            "name": "docs",
            "localPath": "/a",
            "remotePath": "/b",
            "mode": "Upload",
            "diffMode": "FAST",
            "conflictMode": "Prefer-Remote"
        }"#;

        let config: SyncPathConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.mode, SyncMode::Upload);
        assert_eq!(config.diff_mode, DiffMode::Fast);
        assert_eq!(config.conflict_mode, ConflictPolicy::PreferRemote);
    }
}
