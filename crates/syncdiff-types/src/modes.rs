//! Enumerated sync path modes
//!
//! These enums appear both in persisted sync path configurations and in
//! diff requests. Wire values are lowercase strings and parse
//! case-insensitively: input is lowercased before matching, so `"Secure"`,
//! `"SECURE"`, and `"secure"` all decode to [`DiffMode::Secure`].

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! lowercase_string_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Wire representation of this value
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(format!(
                        concat!("invalid ", stringify!($name), " '{}'"),
                        other
                    )),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(de::Error::custom)
            }
        }
    };
}

/// Direction a sync path moves data in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncMode {
    /// Server to client only
    Download,
    /// Client to server only
    Upload,
    /// Bidirectional
    Both,
}

lowercase_string_enum!(SyncMode {
    Download => "download",
    Upload => "upload",
    Both => "both",
});

impl Default for SyncMode {
    fn default() -> Self {
        Self::Both
    }
}

/// How file contents are compared during a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffMode {
    /// Compare size and mtime only; no content read. Can miss a
    /// same-size-same-mtime content change and can false-positive on a
    /// touched-but-unchanged file.
    Fast,
    /// Compare content checksums; the ground truth, recommended for
    /// first-time baselines and periodic revalidation.
    Secure,
}

lowercase_string_enum!(DiffMode {
    Fast => "fast",
    Secure => "secure",
});

impl Default for DiffMode {
    fn default() -> Self {
        Self::Secure
    }
}

/// How an update is directed when both sides changed since the last sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictPolicy {
    /// The side with the most recent mtime wins
    MostRecentWins,
    /// The client side always wins
    PreferLocal,
    /// The server side always wins
    PreferRemote,
}

lowercase_string_enum!(ConflictPolicy {
    MostRecentWins => "most-recent-wins",
    PreferLocal => "prefer-local",
    PreferRemote => "prefer-remote",
});

impl Default for ConflictPolicy {
    fn default() -> Self {
        Self::MostRecentWins
    }
}

/// Scheduler cadence unit for a sync path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleUnit {
    /// No automatic runs
    Disabled,
    /// Cadence counted in minutes
    Minute,
    /// Cadence counted in hours
    Hour,
    /// Cadence counted in days
    Day,
}

lowercase_string_enum!(ScheduleUnit {
    Disabled => "disabled",
    Minute => "minute",
    Hour => "hour",
    Day => "day",
});

impl Default for ScheduleUnit {
    fn default() -> Self {
        Self::Disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("fast", DiffMode::Fast)]
    #[case("FAST", DiffMode::Fast)]
    #[case("Secure", DiffMode::Secure)]
    fn test_diff_mode_parses_case_insensitively(#[case] input: &str, #[case] expected: DiffMode) {
        assert_eq!(input.parse::<DiffMode>().unwrap(), expected);
    }

    #[test]
    fn test_invalid_mode_rejected() {
        assert!("paranoid".parse::<DiffMode>().is_err());
        assert!("sideways".parse::<SyncMode>().is_err());
        assert!("weekly".parse::<ScheduleUnit>().is_err());
    }

    #[test]
    fn test_wire_values_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&ConflictPolicy::MostRecentWins).unwrap(),
            "\"most-recent-wins\""
        );
        assert_eq!(serde_json::to_string(&SyncMode::Both).unwrap(), "\"both\"");
    }

    #[test]
    fn test_deserialize_mixed_case() {
        let policy: ConflictPolicy = serde_json::from_str("\"Prefer-Local\"").unwrap();
        assert_eq!(policy, ConflictPolicy::PreferLocal);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DiffMode::default(), DiffMode::Secure);
        assert_eq!(ScheduleUnit::default(), ScheduleUnit::Disabled);
        assert_eq!(ConflictPolicy::default(), ConflictPolicy::MostRecentWins);
    }
}
