//! Per-path stat model and wire tuple encoding
//!
//! Internally every path maps to a [`SnapshotEntry`]: either a real
//! [`FileStat`] or one of two sentinels (`Filtered`, `Error`). The wire
//! format is positional, matching what sync clients send:
//!
//! - stat tuple: `[isDir, size, mtime, inode, checksum|null]`
//! - filtered sentinel: `["filtered", true]`
//! - error sentinel: `["error", message]`
//!
//! Named fields are used everywhere outside serialization so positional
//! indexing bugs cannot creep into the diff logic. `mtime` is epoch
//! milliseconds on both sides of the protocol; the unit is fixed by
//! contract and never inferred from magnitude.

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const FILTERED_TAG: &str = "filtered";
const ERROR_TAG: &str = "error";

/// Stat information for a single path within a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    /// Whether the path is a directory
    pub is_dir: bool,
    /// File size in bytes (0 for directories)
    pub size: u64,
    /// Last modification time, epoch milliseconds
    pub mtime: i64,
    /// Filesystem inode or file id; meaningful only on the producing side
    pub inode: u64,
    /// Content checksum (SHA-512/256 hex digest); `None` in fast mode and
    /// for directories
    pub checksum: Option<String>,
}

impl FileStat {
    /// Create a stat tuple for a regular file without a checksum
    pub fn file(size: u64, mtime: i64, inode: u64) -> Self {
        Self {
            is_dir: false,
            size,
            mtime,
            inode,
            checksum: None,
        }
    }

    /// Create a stat tuple for a directory
    pub fn directory(mtime: i64, inode: u64) -> Self {
        Self {
            is_dir: true,
            size: 0,
            mtime,
            inode,
            checksum: None,
        }
    }

    /// Attach a content checksum
    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }
}

/// A snapshot entry: a real stat tuple or a sentinel
///
/// Sentinels never participate in content comparison; they only affect
/// whether a path is considered for diffing at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotEntry {
    /// Real stat data for the path
    Stat(FileStat),
    /// Path was deliberately excluded by the filter engine
    Filtered,
    /// Path could not be stat'd; carries the error message
    Error(String),
}

impl SnapshotEntry {
    /// Whether this entry is a `Filtered` or `Error` sentinel
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Self::Stat(_))
    }

    /// Borrow the stat tuple, if this entry carries one
    pub fn as_stat(&self) -> Option<&FileStat> {
        match self {
            Self::Stat(stat) => Some(stat),
            _ => None,
        }
    }
}

impl Serialize for SnapshotEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Stat(stat) => {
                let mut seq = serializer.serialize_seq(Some(5))?;
                seq.serialize_element(&stat.is_dir)?;
                seq.serialize_element(&stat.size)?;
                seq.serialize_element(&stat.mtime)?;
                seq.serialize_element(&stat.inode)?;
                seq.serialize_element(&stat.checksum)?;
                seq.end()
            }
            Self::Filtered => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(FILTERED_TAG)?;
                seq.serialize_element(&true)?;
                seq.end()
            }
            Self::Error(message) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(ERROR_TAG)?;
                seq.serialize_element(message)?;
                seq.end()
            }
        }
    }
}

/// First element of a wire tuple: `bool` for stat tuples, `string` for
/// sentinels
#[derive(Deserialize)]
#[serde(untagged)]
enum TupleHead {
    Dir(bool),
    Tag(String),
}

struct SnapshotEntryVisitor;

impl<'de> Visitor<'de> for SnapshotEntryVisitor {
    type Value = SnapshotEntry;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a stat tuple or a [\"filtered\"|\"error\", ..] sentinel")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let head: TupleHead = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;

        match head {
            TupleHead::Dir(is_dir) => {
                let size: u64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let mtime: i64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let inode: u64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(3, &self))?;
                let checksum: Option<String> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(4, &self))?;

                Ok(SnapshotEntry::Stat(FileStat {
                    is_dir,
                    size,
                    mtime,
                    inode,
                    checksum,
                }))
            }
            TupleHead::Tag(tag) => match tag.as_str() {
                FILTERED_TAG => {
                    let flag: bool = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                    if !flag {
                        return Err(de::Error::custom("filtered sentinel must carry `true`"));
                    }
                    Ok(SnapshotEntry::Filtered)
                }
                ERROR_TAG => {
                    let message: String = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                    Ok(SnapshotEntry::Error(message))
                }
                other => Err(de::Error::custom(format!(
                    "unknown sentinel tag '{other}'"
                ))),
            },
        }
    }
}

impl<'de> Deserialize<'de> for SnapshotEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SnapshotEntryVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_tuple_wire_roundtrip() {
        let entry = SnapshotEntry::Stat(
            FileStat::file(1024, 1_700_000_000_000, 42).with_checksum("abcd"),
        );
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"[false,1024,1700000000000,42,"abcd"]"#);

        let back: SnapshotEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_null_checksum_on_wire() {
        let entry = SnapshotEntry::Stat(FileStat::directory(1000, 1));
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, "[true,0,1000,1,null]");
    }

    #[test]
    fn test_filtered_sentinel() {
        let json = r#"["filtered",true]"#;
        let entry: SnapshotEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry, SnapshotEntry::Filtered);
        assert!(entry.is_sentinel());
        assert_eq!(serde_json::to_string(&entry).unwrap(), json);
    }

    #[test]
    fn test_error_sentinel() {
        let json = r#"["error","permission denied"]"#;
        let entry: SnapshotEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry, SnapshotEntry::Error("permission denied".into()));
        assert_eq!(serde_json::to_string(&entry).unwrap(), json);
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let result: Result<SnapshotEntry, _> = serde_json::from_str(r#"["skipped",true]"#);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("skipped"));
    }

    #[test]
    fn test_truncated_tuple_rejected() {
        let result: Result<SnapshotEntry, _> = serde_json::from_str("[false,1024]");
        assert!(result.is_err());
    }

    #[test]
    fn test_filtered_sentinel_must_be_true() {
        let result: Result<SnapshotEntry, _> = serde_json::from_str(r#"["filtered",false]"#);
        assert!(result.is_err());
    }
}
