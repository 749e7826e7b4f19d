//! A low overhead HTTP/1.1 header layer
//!
//! This crate provides the header collection a HTTP/1.1 server fills for every
//! message, together with the scanners and codecs built on top of it. It focuses
//! on making the common case cheap: the handful of header names that make up
//! nearly all real traffic live in fixed slots, `Content-Length` is kept as a
//! number, and everything else falls back to an insertion ordered map that is
//! only allocated when needed.
//!
//! # Features
//!
//! - Case-insensitive header collection with a known-header fast path
//! - Multi-value fields that keep every occurrence in order
//! - Read-only gate so a parsed head can be shared freely
//! - Allocation-free `Connection` and `Transfer-Encoding` scanners
//! - Header name and value character validation
//! - Request head decoding and response head encoding for `tokio_util` codecs
//!
//! # Example
//!
//! ```
//! use micro_headers::header::{ConnectionOptions, RequestHeaders, TransferCoding};
//!
//! let mut headers = RequestHeaders::new();
//! headers.append("Host", "localhost").unwrap();
//! headers.append("Connection", "keep-alive, Upgrade").unwrap();
//! headers.append("Transfer-Encoding", "gzip, chunked").unwrap();
//! headers.set_read_only();
//!
//! assert_eq!(headers.known().host(), "localhost");
//! assert!(headers.connection_options().contains(ConnectionOptions::UPGRADE));
//! assert_eq!(headers.transfer_coding(), TransferCoding::Chunked);
//! ```
//!
//! # Architecture
//!
//! - [`header`]: the collection, field values, known header layouts, scanners and validators
//! - [`protocol`]: request and response heads, payload framing and error types
//! - [`codec`]: head decoder and encoder
//!
//! # Limitations
//!
//! - HTTP/1.x only
//! - A known header layout holds at most 64 names
//! - Maximum number of headers per decoded request: 64

pub mod codec;
pub mod header;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
