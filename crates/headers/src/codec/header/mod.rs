//! Head decoding and encoding.
//!
//! - [`HeaderDecoder`]: decodes a request head from raw bytes
//!   - enforces the limits of its [`DecoderConfig`]
//!   - validates every header name and value before it is stored
//!   - rejects ambiguous body framing
//!
//! - [`HeaderEncoder`]: encodes a response head to bytes
//!   - writes repeated fields as repeated header lines
//!   - derives `Content-Length` or `Transfer-Encoding` from the payload size

mod header_decoder;
mod header_encoder;

pub use header_decoder::{DecoderConfig, HeaderDecoder};
pub use header_encoder::HeaderEncoder;
