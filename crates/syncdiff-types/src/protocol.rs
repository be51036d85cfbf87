//! Fixed protocol-level constants
//!
//! These values are part of the wire contract between sync clients and the
//! server. None of them are negotiable per request.

/// Checksum algorithm identifier advertised in the capability handshake
///
/// Secure-mode snapshots carry SHA-512/256 hex digests; the algorithm is
/// fixed for the protocol, not negotiated.
pub const CHECKSUM_ALGORITHM: &str = "sha512-256";

/// Terminal message of a streamed diff response
///
/// Emitted after the final plan entry so a streaming receiver knows the
/// plan is complete without a length prefix.
pub const DIFF_COMPLETE: &str = "last";

/// Agent identification string returned by the capability handshake
///
/// Clients check this before starting a sync session to confirm they are
/// talking to a compatible server.
pub const AGENT_STRING: &str = "syncdiff-server";

/// Protocol version reported alongside [`AGENT_STRING`]
pub const PROTOCOL_VERSION: u32 = 1;

/// Filename prefix marking an in-flight staged upload
///
/// A client stages `dir/file.txt` as `dir/.syncpart.file.txt` until the
/// transfer finalizes. This is a naming convention, not a stat sentinel;
/// snapshot builders skip such names entirely.
pub const PARTIAL_UPLOAD_PREFIX: &str = ".syncpart.";

/// Check whether a relative path names an in-flight staged upload
///
/// Only the final path segment is inspected; the marker applies to the base
/// filename, staged in the same directory as its final destination.
pub fn is_partial_upload(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .is_some_and(|name| name.starts_with(PARTIAL_UPLOAD_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(".syncpart.report.pdf", true)]
    #[case("docs/.syncpart.report.pdf", true)]
    #[case("docs/report.pdf", false)]
    #[case("docs/syncpart.report.pdf", false)]
    #[case(".syncpart.dir/report.pdf", false)]
    #[case("", false)]
    fn test_partial_upload_detection(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_partial_upload(path), expected);
    }
}
