//! HTTP-boundary request decoding and plan streaming for syncdiff
//!
//! The transport adapter is a pure boundary concern: it turns an inbound
//! request body (optionally gzip-compressed JSON) into a decoded
//! [`DiffRequest`], and a computed reconciliation plan into a streamed
//! NDJSON response terminated by the diff-complete sentinel. It carries no
//! diff semantics itself; malformed bodies are rejected here and never
//! reach the engine.
//!
//! # Examples
//!
//! ```rust
//! use syncdiff_transport::decode_diff_request;
//!
//! let body = br#"{"secureDiff": true, "firstSync": false}"#;
//! let request = decode_diff_request(body, false).unwrap();
//! assert!(request.secure_diff);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod error;
pub mod handshake;
pub mod request;

pub use codec::{
    decode_diff_request, decode_diff_request_with_limit, encode_plan, PlanWriter,
    MAX_INFLATED_BODY,
};
pub use error::{TransportError, TransportResult};
pub use handshake::Handshake;
pub use request::DiffRequest;
