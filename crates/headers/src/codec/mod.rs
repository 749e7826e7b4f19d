//! HTTP/1.x head codecs.
//!
//! - [`HeaderDecoder`]: parses a request line and header block into a
//!   [`RequestHead`](crate::protocol::RequestHead) and decides its
//!   [`PayloadSize`](crate::protocol::PayloadSize)
//! - [`HeaderEncoder`]: serializes a [`ResponseHead`](crate::protocol::ResponseHead)
//!   together with the framing header for its body
//!
//! Both implement the `tokio_util::codec` traits, so they plug into a `Framed`
//! transport directly. Body codecs are out of scope for this crate.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use micro_headers::codec::HeaderDecoder;
//! use micro_headers::protocol::PayloadSize;
//! use tokio_util::codec::Decoder;
//!
//! let mut buf = BytesMut::from("POST /upload HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello");
//! let (head, payload_size) = HeaderDecoder::new().decode(&mut buf).unwrap().unwrap();
//!
//! assert_eq!(head.uri().path(), "/upload");
//! assert_eq!(head.headers().known().host(), "localhost");
//! assert_eq!(payload_size, PayloadSize::Length(5));
//! assert_eq!(&buf[..], b"hello");
//! ```

mod header;

pub use header::{DecoderConfig, HeaderDecoder, HeaderEncoder};
