//! HTTP response head encoder
//!
//! Serializes the status line and a [`ResponseHeaders`](crate::header::ResponseHeaders)
//! collection. The body framing header is always derived from the
//! [`PayloadSize`] handed in with the head: any `Content-Length` or
//! `Transfer-Encoding` stored in the collection is skipped, so the collection is
//! never modified and may be read-only.

use std::io;
use std::io::Write;

use bytes::{BufMut, BytesMut};
use http::Version;
use tokio_util::codec::Encoder;
use tracing::error;

use crate::header::validate::{validate_header_name, validate_header_values};
use crate::header::{CONTENT_LENGTH, ResponseHeaderSlots};
use crate::protocol::{PayloadSize, ResponseHead, SendError};

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 4 * 1024;

/// Encoder for HTTP response heads implementing the [`Encoder`] trait.
///
/// Every value of a multi-value field is written as its own header line, which
/// keeps `Set-Cookie` intact. Names and values are validated before they are
/// written, so a value holding `\r\n` can never split the response.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderEncoder;

impl Encoder<(ResponseHead, PayloadSize)> for HeaderEncoder {
    type Error = SendError;

    /// Encodes a response head into the provided bytes buffer.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - HTTP version is neither HTTP/1.0 nor HTTP/1.1
    /// - A chunked payload is requested for an HTTP/1.0 response
    /// - A header name or value contains an invalid character
    fn encode(&mut self, item: (ResponseHead, PayloadSize), dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (head, payload_size) = item;

        let version = match head.version() {
            Version::HTTP_11 => "HTTP/1.1",
            Version::HTTP_10 => "HTTP/1.0",
            v => {
                error!(http_version = ?v, "unsupported http version");
                return Err(SendError::unsupported_version(v));
            }
        };

        // refer: https://www.rfc-editor.org/rfc/rfc9112.html#section-6.1
        if head.version() == Version::HTTP_10 && payload_size == PayloadSize::Chunked {
            error!("chunked transfer coding is not available in http/1.0");
            return Err(SendError::invalid_framing("chunked transfer coding is not allowed in http/1.0 responses"));
        }

        let start = dst.len();
        dst.reserve(INIT_HEADER_SIZE);
        write!(FastWrite(dst), "{version} {} {}\r\n", head.status().as_str(), head.status().canonical_reason().unwrap_or(""))?;

        for (name, values) in head.headers() {
            if is_framing_header(name) {
                continue;
            }

            if let Err(e) = validate_header_name(name).and_then(|()| validate_header_values(&values)) {
                error!(header_name = name, cause = %e, "refusing to write invalid header");
                dst.truncate(start);
                return Err(e.into());
            }

            for value in &*values {
                dst.put_slice(name.as_bytes());
                dst.put_slice(b": ");
                dst.put_slice(value.as_bytes());
                dst.put_slice(b"\r\n");
            }
        }

        match payload_size {
            PayloadSize::Length(n) => write!(FastWrite(dst), "{CONTENT_LENGTH}: {n}\r\n")?,
            PayloadSize::Chunked => dst.put_slice(b"Transfer-Encoding: chunked\r\n"),
            PayloadSize::Empty => dst.put_slice(b"Content-Length: 0\r\n"),
        }

        dst.put_slice(b"\r\n");
        Ok(())
    }
}

fn is_framing_header(name: &str) -> bool {
    name.eq_ignore_ascii_case(CONTENT_LENGTH) || name.eq_ignore_ascii_case(ResponseHeaderSlots::TRANSFER_ENCODING)
}

/// Fast writer implementation for writing to BytesMut.
///
/// This is an optimization to avoid unnecessary bounds checking when writing
/// to the bytes buffer, since we've already reserved enough space.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
