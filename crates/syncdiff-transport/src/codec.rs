//! Request decoding and plan streaming
//!
//! Inbound bodies are plain or gzip-compressed JSON; the gzip path inflates
//! fully into memory behind a size cap so a malicious body cannot exhaust
//! the server. Outbound plans are streamed as one JSON value per line and
//! terminated by the diff-complete sentinel string, letting receivers
//! consume arbitrarily large plans without a length prefix.

use crate::error::{TransportError, TransportResult};
use crate::request::DiffRequest;
use flate2::read::GzDecoder;
use std::io::{Read, Write};
use syncdiff_engine::{PlanEntry, ReconciliationPlan, SkippedPath};
use syncdiff_types::DIFF_COMPLETE;
use tracing::debug;

/// Default cap on a decompressed request body, in bytes
pub const MAX_INFLATED_BODY: u64 = 256 * 1024 * 1024;

/// Decode a diff request body using the default inflation cap
///
/// When `gzip` is set (the request carried `content-encoding: gzip`), the
/// body is decompressed first; decompression failure is a client error and
/// never reaches JSON parsing. Parse failures carry the underlying message.
pub fn decode_diff_request(body: &[u8], gzip: bool) -> TransportResult<DiffRequest> {
    decode_diff_request_with_limit(body, gzip, MAX_INFLATED_BODY)
}

/// Decode a diff request body with an explicit cap on the inflated size
///
/// A compressed body that inflates past `limit` bytes is rejected with
/// [`TransportError::BodyTooLarge`] without buffering more than the cap.
pub fn decode_diff_request_with_limit(
    body: &[u8],
    gzip: bool,
    limit: u64,
) -> TransportResult<DiffRequest> {
    if gzip {
        let inflated = inflate(body, limit)?;
        debug!("inflated request body: {} -> {} bytes", body.len(), inflated.len());
        parse_json(&inflated)
    } else {
        parse_json(body)
    }
}

fn parse_json(body: &[u8]) -> TransportResult<DiffRequest> {
    serde_json::from_slice(body).map_err(|e| TransportError::InvalidJson {
        message: e.to_string(),
    })
}

fn inflate(body: &[u8], limit: u64) -> TransportResult<Vec<u8>> {
    let mut out = Vec::new();
    let mut reader = GzDecoder::new(body).take(limit.saturating_add(1));
    reader
        .read_to_end(&mut out)
        .map_err(|e| TransportError::InvalidGzip {
            message: e.to_string(),
        })?;
    if out.len() as u64 > limit {
        return Err(TransportError::BodyTooLarge { limit });
    }
    Ok(out)
}

/// Streams a reconciliation plan as newline-delimited JSON
///
/// Entry and skipped records are emitted as JSON objects, one per line;
/// [`finish`](Self::finish) appends the diff-complete sentinel as a bare
/// JSON string so the receiver knows the plan ended without a length
/// prefix.
#[derive(Debug)]
pub struct PlanWriter<W: Write> {
    writer: W,
}

impl<W: Write> PlanWriter<W> {
    /// Wrap an output stream
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write one plan entry line
    pub fn write_entry(&mut self, entry: &PlanEntry) -> TransportResult<()> {
        self.write_line(entry)
    }

    /// Write one skipped-path line
    pub fn write_skipped(&mut self, skipped: &SkippedPath) -> TransportResult<()> {
        self.write_line(skipped)
    }

    /// Terminate the stream with the diff-complete sentinel
    pub fn finish(mut self) -> TransportResult<W> {
        self.write_line(&DIFF_COMPLETE)?;
        Ok(self.writer)
    }

    fn write_line<T: serde::Serialize>(&mut self, value: &T) -> TransportResult<()> {
        serde_json::to_writer(&mut self.writer, value).map_err(|e| TransportError::Encode {
            message: e.to_string(),
        })?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| TransportError::Encode {
                message: e.to_string(),
            })
    }
}

/// Encode a whole plan into one NDJSON buffer, sentinel included
pub fn encode_plan(plan: &ReconciliationPlan) -> TransportResult<Vec<u8>> {
    let mut writer = PlanWriter::new(Vec::new());
    for entry in &plan.entries {
        writer.write_entry(entry)?;
    }
    for skipped in &plan.skipped {
        writer.write_skipped(skipped)?;
    }
    writer.finish()
}
