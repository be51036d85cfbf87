//! Capability handshake
//!
//! Returned to a client before it starts a sync session so it can confirm
//! it is talking to a compatible server: a fixed agent identification
//! string, the protocol version, the checksum algorithm secure mode uses,
//! and the comparison modes the server accepts.

use serde::{Deserialize, Serialize};
use syncdiff_types::{DiffMode, AGENT_STRING, CHECKSUM_ALGORITHM, PROTOCOL_VERSION};

/// Server capability advertisement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    /// Fixed agent identification string
    pub agent: String,
    /// Protocol version the server speaks
    pub protocol_version: u32,
    /// Checksum algorithm used in secure mode
    pub checksum_algorithm: String,
    /// Comparison modes the server accepts
    pub diff_modes: Vec<DiffMode>,
}

impl Handshake {
    /// The handshake this server version advertises
    pub fn current() -> Self {
        Self {
            agent: AGENT_STRING.to_string(),
            protocol_version: PROTOCOL_VERSION,
            checksum_algorithm: CHECKSUM_ALGORITHM.to_string(),
            diff_modes: vec![DiffMode::Fast, DiffMode::Secure],
        }
    }

    /// Whether a client that received this handshake can proceed
    pub fn is_compatible(&self) -> bool {
        self.agent == AGENT_STRING && self.protocol_version == PROTOCOL_VERSION
    }
}

impl Default for Handshake {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_handshake_is_compatible() {
        assert!(Handshake::current().is_compatible());
    }

    #[test]
    fn test_foreign_agent_is_incompatible() {
        let mut handshake = Handshake::current();
        handshake.agent = "other-server".into();
        assert!(!handshake.is_compatible());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(Handshake::current()).unwrap();

        assert_eq!(json["agent"], "syncdiff-server");
        assert_eq!(json["protocolVersion"], 1);
        assert_eq!(json["checksumAlgorithm"], "sha512-256");
        assert_eq!(json["diffModes"][1], "secure");
    }
}
