//! In-memory sync path store with optimistic concurrency
//!
//! The registry is the single authority for sync path definitions. Two
//! clients racing to update the same pairing are serialized by the
//! timestamp token: an update must present the timestamp it last read, and
//! a mismatch rejects the write instead of clobbering the other client's
//! change. The diff engine never mutates the registry.

use crate::error::{ConfigError, ConfigResult};
use crate::SyncPathConfig;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info};

/// Thread-safe registry of sync path configurations
#[derive(Debug, Default)]
pub struct SyncPathRegistry {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    paths: HashMap<u64, SyncPathConfig>,
    next_id: u64,
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl SyncPathRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new sync path
    ///
    /// The config must validate and must not carry an id. The registry
    /// assigns the id and the initial concurrency timestamp, and returns
    /// the stored config.
    pub fn register(&self, mut config: SyncPathConfig) -> ConfigResult<SyncPathConfig> {
        config.validate()?;
        if config.id.is_some() {
            return Err(ConfigError::IdMismatch {
                message: "id must be absent on create".into(),
            });
        }

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.next_id += 1;
        let id = inner.next_id;

        config.id = Some(id);
        config.timestamp = now_millis();
        inner.paths.insert(id, config.clone());

        info!("registered sync path {id} ('{}')", config.name);
        Ok(config)
    }

    /// Fetch a sync path by id
    pub fn get(&self, id: u64) -> ConfigResult<SyncPathConfig> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .paths
            .get(&id)
            .cloned()
            .ok_or(ConfigError::UnknownId { id })
    }

    /// List all registered sync paths
    pub fn list(&self) -> Vec<SyncPathConfig> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.paths.values().cloned().collect()
    }

    /// Update an existing sync path
    ///
    /// The config must validate, carry its id, and present the timestamp
    /// currently stored; otherwise the update is rejected. On success the
    /// stored timestamp advances strictly and the new config is returned.
    pub fn update(&self, mut config: SyncPathConfig) -> ConfigResult<SyncPathConfig> {
        config.validate()?;
        let id = config.id.ok_or_else(|| ConfigError::IdMismatch {
            message: "id is required on update".into(),
        })?;

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let stored = inner
            .paths
            .get_mut(&id)
            .ok_or(ConfigError::UnknownId { id })?;

        if stored.timestamp != config.timestamp {
            return Err(ConfigError::Conflict {
                expected: stored.timestamp,
                provided: config.timestamp,
            });
        }

        config.timestamp = now_millis().max(stored.timestamp + 1);
        *stored = config.clone();

        debug!("updated sync path {id}");
        Ok(config)
    }

    /// Record the completion time of a sync run
    ///
    /// Server-internal bookkeeping: updates `last_sync` without advancing
    /// the concurrency token, which only guards client-driven mutations.
    pub fn record_sync(&self, id: u64, completed_at: i64) -> ConfigResult<()> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let stored = inner
            .paths
            .get_mut(&id)
            .ok_or(ConfigError::UnknownId { id })?;
        stored.last_sync = Some(completed_at);
        Ok(())
    }

    /// Remove a sync path, returning its last stored state
    pub fn unregister(&self, id: u64) -> ConfigResult<SyncPathConfig> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let removed = inner
            .paths
            .remove(&id)
            .ok_or(ConfigError::UnknownId { id })?;
        info!("unregistered sync path {id}");
        Ok(removed)
    }
}
