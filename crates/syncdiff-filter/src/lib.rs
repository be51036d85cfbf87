//! Path exclusion rules for syncdiff snapshots
//!
//! A [`FilterSet`] combines two exclusion mechanisms evaluated per candidate
//! path:
//!
//! - **Default filters**: a set of literal names (OS metadata files,
//!   temp-file markers, and the like). A path is excluded when any of its
//!   `/`-separated segments exactly matches an entry. Matching is
//!   case-sensitive; `.DS_Store` does not exclude `.ds_store`.
//! - **Path filter**: an optional user-supplied regular expression compiled
//!   case-insensitively and matched anywhere in the full relative path.
//!
//! Default filters are per-call data supplied by the client with each diff
//! request, never hardcoded, so exclusion sets can vary per sync path.
//! Excluded paths are recorded in snapshots as `Filtered` sentinels rather
//! than omitted, letting the receiving side distinguish "not present" from
//! "deliberately skipped".
//!
//! # Examples
//!
//! ```rust
//! use syncdiff_filter::FilterSet;
//!
//! let filters = FilterSet::new([".DS_Store".to_string(), "Thumbs.db".to_string()])
//!     .with_path_filter(Some(r"\.tmp$"))
//!     .unwrap();
//!
//! assert!(filters.should_exclude("photos/.DS_Store"));
//! assert!(filters.should_exclude("build/OUTPUT.TMP"));
//! assert!(!filters.should_exclude("photos/holiday.jpg"));
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use syncdiff_types::{Error, Result};
use tracing::trace;

/// Compiled exclusion rules applied while building a snapshot
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    defaults: HashSet<String>,
    path_filter: Option<Regex>,
}

impl FilterSet {
    /// Create a filter set from the client-supplied default exclusion names
    pub fn new<I>(defaults: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            defaults: defaults.into_iter().collect(),
            path_filter: None,
        }
    }

    /// Attach an optional path regular expression, compiled case-insensitively
    ///
    /// An empty or absent pattern leaves the set unchanged. Compilation
    /// failures are reported as [`Error::Filter`] with the offending
    /// pattern so the transport layer can reject the request before any
    /// snapshot work starts.
    pub fn with_path_filter(mut self, pattern: Option<&str>) -> Result<Self> {
        match pattern {
            Some(expr) if !expr.is_empty() => {
                let regex = RegexBuilder::new(expr)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| Error::filter(format!("invalid path filter '{expr}': {e}")))?;
                self.path_filter = Some(regex);
                Ok(self)
            }
            _ => Ok(self),
        }
    }

    /// Decide whether a relative path is excluded from synchronization
    ///
    /// Returns true when any path segment exactly matches a default filter
    /// entry, or when the path filter matches anywhere in the path.
    pub fn should_exclude(&self, path: &str) -> bool {
        if !self.defaults.is_empty() && path.split('/').any(|seg| self.defaults.contains(seg)) {
            trace!("excluding '{path}' via default filter");
            return true;
        }

        if let Some(regex) = &self.path_filter {
            if regex.is_match(path) {
                trace!("excluding '{path}' via path filter");
                return true;
            }
        }

        false
    }

    /// Whether this set excludes nothing
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty() && self.path_filter.is_none()
    }
}
