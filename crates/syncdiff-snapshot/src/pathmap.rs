//! Path-keyed map with Unicode-normalization-independent lookup
//!
//! Different operating systems hand back differently-normalized Unicode for
//! the same logical filename (macOS decomposes to NFD, most others keep
//! NFC). [`NormalizedPathMap`] makes the normalization form irrelevant for
//! lookups while preserving the literal spelling the first writer used.
//!
//! The map is a composition of two plain `HashMap`s rather than a wrapper
//! around an overridden collection type: a primary map keyed by the stored
//! literal spelling, and a secondary index from the NFC form of each key to
//! that stored spelling. Every operation normalizes its probe to NFC,
//! resolves the stored key through the index, then touches the primary map.

use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

fn nfc(path: &str) -> String {
    path.nfc().collect()
}

/// A map keyed by filesystem path that resolves lookups independent of
/// Unicode normalization form
///
/// The canonical spelling of a key is decided by its **first** writer:
/// re-inserting under an equivalent spelling in another normalization form
/// overwrites the value but leaves the stored key untouched. All operations
/// are O(1) average.
#[derive(Debug, Clone)]
pub struct NormalizedPathMap<V> {
    entries: HashMap<String, V>,
    index: HashMap<String, String>,
}

impl<V> Default for NormalizedPathMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> NormalizedPathMap<V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            index: HashMap::new(),
        }
    }

    /// Create an empty map with at least the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert a value under a path key
    ///
    /// If a normalization-equivalent key is already present its value is
    /// replaced (and returned) while the originally stored spelling stays
    /// canonical. Otherwise the literal key is stored as given.
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        let normalized = nfc(&key);
        match self.index.get(&normalized) {
            Some(stored) => self.entries.insert(stored.clone(), value),
            None => {
                self.index.insert(normalized, key.clone());
                self.entries.insert(key, value)
            }
        }
    }

    /// Look up a value by any normalization-equivalent spelling of its key
    pub fn get(&self, key: &str) -> Option<&V> {
        let stored = self.index.get(&nfc(key))?;
        self.entries.get(stored)
    }

    /// Whether a normalization-equivalent key is present
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(&nfc(key))
    }

    /// Remove an entry by any normalization-equivalent spelling of its key
    ///
    /// Both the index entry and the underlying mapping entry are removed
    /// together; no partial state is observable afterwards.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let stored = self.index.remove(&nfc(key))?;
        self.entries.remove(&stored)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (stored key, value) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &V)> {
        self.entries.iter()
    }

    /// Iterate over the stored key spellings
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }
}

impl<V> FromIterator<(String, V)> for NormalizedPathMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // "é" precomposed (NFC) vs "e" + combining acute (NFD)
    const NFC_NAME: &str = "r\u{e9}sum\u{e9}.txt";
    const NFD_NAME: &str = "re\u{301}sume\u{301}.txt";

    #[test]
    fn test_lookup_across_normalization_forms() {
        let mut map = NormalizedPathMap::new();
        map.insert(NFC_NAME.to_string(), 1);

        assert_eq!(map.get(NFD_NAME), Some(&1));
        assert!(map.contains(NFD_NAME));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_first_write_wins_for_spelling() {
        let mut map = NormalizedPathMap::new();
        map.insert(NFD_NAME.to_string(), 1);
        map.insert(NFC_NAME.to_string(), 2);

        // value overwritten, stored spelling unchanged
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(NFC_NAME), Some(&2));
        assert_eq!(map.keys().next().map(String::as_str), Some(NFD_NAME));
    }

    #[test]
    fn test_insert_returns_previous_value() {
        let mut map = NormalizedPathMap::new();
        assert_eq!(map.insert(NFC_NAME.to_string(), 1), None);
        assert_eq!(map.insert(NFD_NAME.to_string(), 2), Some(1));
    }

    #[test]
    fn test_remove_by_equivalent_spelling() {
        let mut map = NormalizedPathMap::new();
        map.insert(NFC_NAME.to_string(), 1);

        assert_eq!(map.remove(NFD_NAME), Some(1));
        assert!(map.is_empty());
        assert!(!map.contains(NFC_NAME));

        // re-insert after removal picks up the new spelling
        map.insert(NFD_NAME.to_string(), 3);
        assert_eq!(map.keys().next().map(String::as_str), Some(NFD_NAME));
    }

    #[test]
    fn test_remove_missing_returns_none() {
        let mut map: NormalizedPathMap<i32> = NormalizedPathMap::new();
        assert_eq!(map.remove("absent"), None);
    }

    #[test]
    fn test_ascii_paths_unaffected() {
        let mut map = NormalizedPathMap::new();
        map.insert("a/b/c.txt".to_string(), 1);
        map.insert("a/b/d.txt".to_string(), 2);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a/b/c.txt"), Some(&1));
        assert_eq!(map.remove("a/b/c.txt"), Some(1));
        assert_eq!(map.len(), 1);
    }

    proptest! {
        #[test]
        fn test_set_then_get_roundtrip(key in "\\PC{1,40}", value in any::<u32>()) {
            let mut map = NormalizedPathMap::new();
            map.insert(key.clone(), value);
            prop_assert_eq!(map.get(&key), Some(&value));
            prop_assert!(map.contains(&key));
        }

        #[test]
        fn test_nfc_probe_equals_literal_probe(key in "\\PC{1,40}") {
            let mut map = NormalizedPathMap::new();
            map.insert(key.clone(), 0u8);
            let nfc_key: String = key.nfc().collect();
            prop_assert_eq!(map.get(&nfc_key), map.get(&key));
        }
    }
}
