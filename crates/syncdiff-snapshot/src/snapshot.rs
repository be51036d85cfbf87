//! The path-to-stat mapping exchanged in a diff request
//!
//! On the wire a snapshot is a JSON object mapping relative paths to
//! positional stat tuples (see `syncdiff-types`). Keys are Unicode strings
//! in whatever normalization form the producing filesystem handed back, so
//! the in-memory representation wraps a [`NormalizedPathMap`]: two wire keys
//! differing only by normalization form resolve to the same logical entry
//! instead of silently creating a duplicate.

use crate::pathmap::NormalizedPathMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use syncdiff_types::{FileStat, SnapshotEntry};

/// A snapshot of a tree at one point in time
///
/// Deserializing collapses normalization-equivalent duplicate keys through
/// the map's insert semantics: the first occurrence's spelling is kept, a
/// later occurrence only overwrites the value.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: NormalizedPathMap<SnapshotEntry>,
}

impl Snapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self {
            entries: NormalizedPathMap::new(),
        }
    }

    /// Insert an entry for a path
    pub fn insert(&mut self, path: String, entry: SnapshotEntry) -> Option<SnapshotEntry> {
        self.entries.insert(path, entry)
    }

    /// Look up an entry by any normalization-equivalent path spelling
    pub fn get(&self, path: &str) -> Option<&SnapshotEntry> {
        self.entries.get(path)
    }

    /// Borrow the stat tuple for a path, if present and not a sentinel
    pub fn stat(&self, path: &str) -> Option<&FileStat> {
        self.get(path).and_then(SnapshotEntry::as_stat)
    }

    /// Whether the snapshot holds an entry for the path
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains(path)
    }

    /// Remove an entry by any normalization-equivalent path spelling
    pub fn remove(&mut self, path: &str) -> Option<SnapshotEntry> {
        self.entries.remove(path)
    }

    /// Number of entries, sentinels included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (stored path, entry) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SnapshotEntry)> {
        self.entries.iter()
    }

    /// Iterate over the stored path spellings
    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }
}

impl FromIterator<(String, SnapshotEntry)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, SnapshotEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Snapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (path, entry) in self.iter() {
            map.serialize_entry(path, entry)?;
        }
        map.end()
    }
}

struct SnapshotVisitor;

impl<'de> Visitor<'de> for SnapshotVisitor {
    type Value = Snapshot;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of path to stat tuple")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut snapshot = Snapshot::new();
        while let Some((path, entry)) = access.next_entry::<String, SnapshotEntry>()? {
            snapshot.insert(path, entry);
        }
        Ok(snapshot)
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SnapshotVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_deserialize() {
        let json = r#"{
            "a.txt": [false, 100, 1000, 5, null],
            "dir1": [true, 0, 1000, 1, null],
            "skip.me": ["filtered", true],
            "locked.bin": ["error", "permission denied"]
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.stat("a.txt").unwrap().size, 100);
        assert!(snapshot.stat("dir1").unwrap().is_dir);
        assert_eq!(snapshot.get("skip.me"), Some(&SnapshotEntry::Filtered));
        assert!(matches!(
            snapshot.get("locked.bin"),
            Some(SnapshotEntry::Error(_))
        ));
    }

    #[test]
    fn test_normalization_equivalent_keys_collapse() {
        // same logical name in NFD then NFC form
        let json = "{\"re\u{301}sume\u{301}.txt\": [false, 1, 10, 1, null],
                     \"r\u{e9}sum\u{e9}.txt\": [false, 2, 20, 1, null]}";

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.len(), 1);
        // first spelling kept, later value wins
        assert_eq!(
            snapshot.paths().next().map(String::as_str),
            Some("re\u{301}sume\u{301}.txt")
        );
        assert_eq!(snapshot.stat("r\u{e9}sum\u{e9}.txt").unwrap().size, 2);
    }

    #[test]
    fn test_serialize_preserves_stored_spelling() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(
            "re\u{301}sume\u{301}.txt".to_string(),
            SnapshotEntry::Stat(FileStat::file(1, 10, 1)),
        );

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("re\u{301}sume\u{301}.txt"));
    }

    #[test]
    fn test_malformed_entry_rejected() {
        let json = r#"{"a.txt": [false, 100]}"#;
        let result: Result<Snapshot, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
