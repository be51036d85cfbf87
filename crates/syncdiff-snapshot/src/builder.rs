//! Async filesystem walk producing a snapshot
//!
//! The builder walks a root directory and records one [`SnapshotEntry`] per
//! relative path. Filtered paths become `Filtered` sentinels rather than
//! being omitted, per-path stat or read failures become `Error` sentinels
//! inline (one bad path never aborts the walk), and in-flight staged uploads
//! are skipped entirely by their filename marker.
//!
//! The walk holds no state besides the map under construction, so dropping
//! the future when a client disconnects mid-walk needs no cleanup.

use crate::snapshot::Snapshot;
use sha2::{Digest, Sha512_256};
use std::path::Path;
use syncdiff_filter::FilterSet;
use syncdiff_types::{is_partial_upload, Error, FileStat, Result, SnapshotEntry};
use tokio::fs;
use tracing::{debug, info, warn};

/// Builds snapshots of a local tree
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    filters: FilterSet,
    secure: bool,
}

impl SnapshotBuilder {
    /// Create a builder applying the given exclusion rules
    pub fn new(filters: FilterSet) -> Self {
        Self {
            filters,
            secure: false,
        }
    }

    /// Enable secure mode: compute content checksums for regular files
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Walk `root` and produce a snapshot of its tree
    ///
    /// Paths in the snapshot are relative to `root` and `/`-separated.
    /// Fails only when the root itself cannot be read; everything below it
    /// degrades to inline sentinels.
    pub async fn build<P: AsRef<Path>>(&self, root: P) -> Result<Snapshot> {
        let root = root.as_ref();
        let mut snapshot = Snapshot::new();

        self.walk(root, String::new(), &mut snapshot).await?;

        info!(
            "snapshot of '{}': {} entries (secure={})",
            root.display(),
            snapshot.len(),
            self.secure
        );
        Ok(snapshot)
    }

    fn walk<'a>(
        &'a self,
        dir: &'a Path,
        prefix: String,
        snapshot: &'a mut Snapshot,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let mut entries = match fs::read_dir(dir).await {
                Ok(entries) => entries,
                Err(e) if prefix.is_empty() => {
                    return Err(Error::Io {
                        message: format!(
                            "Failed to read directory '{}': {}",
                            dir.display(),
                            e
                        ),
                    });
                }
                Err(e) => {
                    // an unreadable subtree degrades to a sentinel on the
                    // directory, not an abort
                    snapshot.insert(prefix, SnapshotEntry::Error(e.to_string()));
                    return Ok(());
                }
            };

            loop {
                let entry = match entries.next_entry().await {
                    Ok(Some(entry)) => entry,
                    Ok(None) => break,
                    Err(e) if prefix.is_empty() => {
                        return Err(Error::Io {
                            message: format!(
                                "Failed to read directory '{}': {}",
                                dir.display(),
                                e
                            ),
                        });
                    }
                    Err(e) => {
                        // remaining siblings are lost; surface that on the
                        // directory instead of dropping them silently
                        warn!("stopping iteration of '{}': {e}", dir.display());
                        snapshot.insert(prefix.clone(), SnapshotEntry::Error(e.to_string()));
                        break;
                    }
                };

                let name = entry.file_name().to_string_lossy().into_owned();
                if is_partial_upload(&name) {
                    debug!("skipping staged upload: {name}");
                    continue;
                }

                let rel = if prefix.is_empty() {
                    name
                } else {
                    format!("{prefix}/{name}")
                };

                if self.filters.should_exclude(&rel) {
                    snapshot.insert(rel, SnapshotEntry::Filtered);
                    continue;
                }

                let metadata = match entry.metadata().await {
                    Ok(metadata) => metadata,
                    Err(e) => {
                        snapshot.insert(rel, SnapshotEntry::Error(e.to_string()));
                        continue;
                    }
                };

                let mtime = epoch_millis(&metadata);
                let inode = file_id(&metadata);
                let path = entry.path();

                if metadata.is_dir() {
                    snapshot.insert(
                        rel.clone(),
                        SnapshotEntry::Stat(FileStat::directory(mtime, inode)),
                    );
                    self.walk(&path, rel, snapshot).await?;
                } else {
                    let mut stat = FileStat::file(metadata.len(), mtime, inode);
                    if self.secure {
                        match checksum_file(&path).await {
                            Ok(digest) => stat = stat.with_checksum(digest),
                            Err(e) => {
                                snapshot.insert(rel, SnapshotEntry::Error(e.to_string()));
                                continue;
                            }
                        }
                    }
                    snapshot.insert(rel, SnapshotEntry::Stat(stat));
                }
            }

            Ok(())
        })
    }
}

/// SHA-512/256 hex digest of a file's contents
async fn checksum_file(path: &Path) -> Result<String> {
    let content = fs::read(path).await.map_err(|e| Error::Io {
        message: format!("Failed to read file '{}': {}", path.display(), e),
    })?;
    Ok(hex::encode(Sha512_256::digest(&content)))
}

fn epoch_millis(metadata: &std::fs::Metadata) -> i64 {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}

#[cfg(unix)]
fn file_id(metadata: &std::fs::Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.ino()
}

#[cfg(not(unix))]
fn file_id(_metadata: &std::fs::Metadata) -> u64 {
    0
}
