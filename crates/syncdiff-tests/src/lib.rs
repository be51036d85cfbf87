//! Integration test support for the syncdiff workspace
//!
//! Shared helpers for exercising a full diff exchange: request bodies,
//! snapshot fixtures, and gzip encoding.

#![warn(missing_docs)]
#![warn(clippy::all)]

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// Gzip-compress a request body the way a sync client would
pub fn gzip_body(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .expect("writing to an in-memory encoder cannot fail");
    encoder.finish().expect("gzip finish on in-memory buffer")
}
