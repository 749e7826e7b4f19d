//! HTTP request head decoder
//!
//! Parses the request line and header block with `httparse`, copies every field
//! into a [`RequestHeaders`] collection and decides how the body is framed.
//!
//! # Limits
//!
//! Limits come from [`DecoderConfig`]:
//!
//! - Maximum number of headers: 64 by default, never more than 64
//! - Maximum head size: 8KB by default
//! - Only HTTP/1.0 and HTTP/1.1 are supported
//!
//! # Body framing
//!
//! A request that carries both `Transfer-Encoding` and `Content-Length`, whose
//! final transfer coding is not `chunked`, or that sends `Transfer-Encoding` over
//! HTTP/1.0 is rejected: its body length cannot be determined safely and
//! accepting it opens the door to request smuggling.
//!
//! refer: <https://www.rfc-editor.org/rfc/rfc9112.html#name-message-body-length>

use std::mem::MaybeUninit;
use std::str;

use bytes::{Buf, BytesMut};
use http::{Method, Uri, Version};
use httparse::{Error, Status};
use tokio_util::codec::Decoder;
use tracing::{debug, trace, warn};

use crate::ensure;
use crate::header::validate::{validate_header_name, validate_header_value, validate_header_value_non_ascii};
use crate::header::{RequestHeaders, TransferCoding};
use crate::protocol::{HeaderError, ParseError, PayloadSize, RequestHead};

/// Maximum number of headers the decoder can hold
const MAX_HEADER_NUM: usize = 64;

/// Default maximum size in bytes of the request line plus header block
const MAX_HEADER_BYTES: usize = 8 * 1024;

/// Shortest complete request head: `GET / HTTP/1.1\n\n`
const MIN_REQUEST_LEN: usize = 16;

/// Limits and character rules applied by [`HeaderDecoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum number of header lines, capped at 64.
    pub max_headers: usize,
    /// Maximum size of the request line plus header block, in bytes.
    pub max_header_bytes: usize,
    /// Accept non-ASCII characters in header values.
    pub allow_non_ascii_values: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self { max_headers: MAX_HEADER_NUM, max_header_bytes: MAX_HEADER_BYTES, allow_non_ascii_values: false }
    }
}

impl DecoderConfig {
    pub fn with_max_headers(mut self, max_headers: usize) -> Self {
        self.max_headers = max_headers.min(MAX_HEADER_NUM);
        self
    }

    pub fn with_max_header_bytes(mut self, max_header_bytes: usize) -> Self {
        self.max_header_bytes = max_header_bytes;
        self
    }

    pub fn with_non_ascii_values(mut self, allow: bool) -> Self {
        self.allow_non_ascii_values = allow;
        self
    }
}

/// Decoder for HTTP request heads implementing the [`Decoder`] trait.
///
/// Each decoded [`RequestHead`] owns a fresh, read-only header collection. The
/// decoder keeps no state between messages.
#[derive(Debug, Clone, Default)]
pub struct HeaderDecoder {
    config: DecoderConfig,
}

impl HeaderDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    fn validate_field(&self, name: &str, value: &str) -> Result<(), HeaderError> {
        validate_header_name(name)?;
        if self.config.allow_non_ascii_values { validate_header_value_non_ascii(value) } else { validate_header_value(value) }
    }
}

impl Decoder for HeaderDecoder {
    type Item = (RequestHead, PayloadSize);
    type Error = ParseError;

    /// Attempts to decode a request head from the provided bytes buffer.
    ///
    /// On success the head is split off `src`, leaving the body bytes in place.
    ///
    /// # Returns
    ///
    /// - `Ok(Some((head, payload_size)))` if a complete head was parsed
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if parsing failed
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The number of headers exceeds the configured maximum
    /// - The head size exceeds the configured maximum
    /// - The HTTP version, method or URI is invalid
    /// - A header name or value contains an invalid character
    /// - The body framing headers are invalid or conflicting
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < MIN_REQUEST_LEN {
            return Ok(None);
        }

        let max_headers = self.config.max_headers.min(MAX_HEADER_NUM);
        let max_header_bytes = self.config.max_header_bytes;

        let mut req = httparse::Request::new(&mut []);
        let mut headers: [MaybeUninit<httparse::Header<'_>>; MAX_HEADER_NUM] = [const { MaybeUninit::uninit() }; MAX_HEADER_NUM];

        let parsed_result = req.parse_with_uninit_headers(src, &mut headers[..max_headers]).map_err(|e| match e {
            Error::TooManyHeaders => ParseError::too_many_headers(max_headers),
            e => ParseError::invalid_header(e.to_string()),
        });

        let body_offset = match parsed_result? {
            Status::Complete(body_offset) => body_offset,
            Status::Partial => {
                ensure!(src.len() <= max_header_bytes, ParseError::too_large_header(src.len(), max_header_bytes));
                return Ok(None);
            }
        };

        trace!(head_size = body_offset, header_count = req.headers.len(), "parsed request head");
        ensure!(body_offset <= max_header_bytes, ParseError::too_large_header(body_offset, max_header_bytes));

        let version = match req.version {
            Some(0) => Version::HTTP_10,
            Some(1) => Version::HTTP_11,
            // Currently HTTP/2 and HTTP/3 not supported
            _ => return Err(ParseError::InvalidVersion(req.version)),
        };
        let method = req.method.ok_or(ParseError::InvalidMethod)?;
        let method = Method::from_bytes(method.as_bytes()).ok().ok_or(ParseError::InvalidMethod)?;
        let uri = Uri::try_from(req.path.ok_or(ParseError::InvalidUri)?).ok().ok_or(ParseError::InvalidUri)?;

        let mut header_map = RequestHeaders::new();
        for header in req.headers.iter() {
            let value = str::from_utf8(header.value)
                .map_err(|e| ParseError::invalid_header(format!("value of {} is not valid utf-8: {e}", header.name)))?;
            self.validate_field(header.name, value)?;
            header_map.append(header.name, value).map_err(|e| match e {
                HeaderError::InvalidContentLength { value } => ParseError::invalid_content_length(value),
                e => ParseError::from(e),
            })?;
        }
        header_map.set_read_only();

        src.advance(body_offset);

        let payload_size = parse_payload(version, &header_map)?;
        debug!(?method, %uri, ?payload_size, "decoded request head");

        Ok(Some((RequestHead::new(method, uri, version, header_map), payload_size)))
    }
}

/// Decides the body framing of a request from its headers.
///
/// - `Transfer-Encoding` on an HTTP/1.0 request is an error
/// - `Transfer-Encoding` together with `Content-Length` is an error
/// - `Transfer-Encoding` whose final coding is `chunked` means a chunked body
/// - any other `Transfer-Encoding` is an error
/// - otherwise `Content-Length` gives the exact body size, and no header means no body
fn parse_payload(version: Version, headers: &RequestHeaders) -> Result<PayloadSize, ParseError> {
    let has_transfer_encoding = !headers.known().transfer_encoding().is_empty();

    // refer: https://www.rfc-editor.org/rfc/rfc9112.html#section-6.1
    if has_transfer_encoding && version == Version::HTTP_10 {
        warn!(transfer_encoding = %headers.known().transfer_encoding(), "transfer-encoding sent over http/1.0");
        return Err(ParseError::invalid_framing("transfer-encoding is not allowed in http/1.0 requests"));
    }

    match (has_transfer_encoding, headers.content_length()) {
        (true, Some(length)) => {
            warn!(content_length = length, "transfer-encoding and content-length both present");
            Err(ParseError::invalid_framing("transfer-encoding and content-length both present in headers"))
        }

        (true, None) => match headers.transfer_coding() {
            TransferCoding::Chunked => Ok(PayloadSize::Chunked),
            coding => {
                warn!(?coding, transfer_encoding = %headers.known().transfer_encoding(), "final transfer coding is not chunked");
                Err(ParseError::invalid_framing("final transfer coding is not chunked"))
            }
        },

        (false, None | Some(0)) => Ok(PayloadSize::Empty),

        (false, Some(length)) => Ok(PayloadSize::Length(length)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::ConnectionOptions;
    use indoc::indoc;

    fn decode(str: &str) -> Result<Option<(RequestHead, PayloadSize)>, ParseError> {
        HeaderDecoder::new().decode(&mut BytesMut::from(str))
    }

    fn decode_complete(str: &str) -> (RequestHead, PayloadSize) {
        decode(str).unwrap().unwrap()
    }

    #[test]
    fn test_bytes_mut_lens() {
        let str = indoc! {r##"
        GET /index.html HTTP/1.1
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        123"##};

        let mut bytes = BytesMut::from(str);

        assert_eq!(bytes.len(), str.len());

        let mut header_decoder = HeaderDecoder::new();

        let result = header_decoder.decode(&mut bytes).unwrap();

        assert!(result.is_some());

        assert_eq!(bytes.len(), 3);
        assert_eq!(&bytes[..], &b"123"[..]);
    }

    #[test]
    fn partial_head_needs_more_data() {
        let mut bytes = BytesMut::from("GET /index.html HTTP/1.1\r\nHost: 127.0.0.1");
        let before = bytes.len();

        assert!(HeaderDecoder::new().decode(&mut bytes).unwrap().is_none());
        assert_eq!(bytes.len(), before);

        assert!(decode("GET / HTTP").unwrap().is_none());
    }

    #[test]
    fn from_curl() {
        let str = indoc! {r##"
        GET /index.html HTTP/1.1
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        "##};

        let (header, payload_size) = decode_complete(str);

        assert!(payload_size.is_empty());

        assert_eq!(header.method(), &Method::GET);
        assert_eq!(header.version(), Version::HTTP_11);
        assert_eq!(header.uri().host(), None);
        assert_eq!(header.uri().path(), "/index.html");
        assert_eq!(header.uri().scheme(), None);
        assert_eq!(header.uri().query(), None);

        assert_eq!(header.headers().count(), 3);
        assert!(header.headers().is_read_only());

        assert_eq!(header.headers().known().accept(), "*/*");
        assert_eq!(header.headers().known().host(), "127.0.0.1:8080");
        assert_eq!(header.headers().get("user-agent").as_ref(), "curl/7.79.1");
        assert!(header.keep_alive());
    }

    #[test]
    fn from_edge() {
        let str = indoc! {r##"
        GET /index/?a=1&b=2&a=3 HTTP/1.1
        Host: 127.0.0.1:8080
        Connection: keep-alive
        Cache-Control: max-age=0
        sec-ch-ua: "#Not_A Brand";v="99", "Microsoft Edge";v="109", "Chromium";v="109"
        sec-ch-ua-mobile: ?0
        sec-ch-ua-platform: "macOS"
        Upgrade-Insecure-Requests: 1
        User-Agent: Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36 Edg/109.0.1518.52
        Accept: text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9
        Sec-Fetch-Site: none
        Sec-Fetch-Mode: navigate
        Sec-Fetch-User: ?1
        Sec-Fetch-Dest: document
        Accept-Encoding: gzip, deflate, br
        Accept-Language: zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7

        "##};

        let (header, payload_size) = decode_complete(str);

        assert!(payload_size.is_empty());

        assert_eq!(header.method(), &Method::GET);
        assert_eq!(header.version(), Version::HTTP_11);
        assert_eq!(header.uri().path(), "/index/");
        assert_eq!(header.uri().query(), Some("a=1&b=2&a=3"));

        let headers = header.headers();
        assert_eq!(headers.count(), 15);

        assert_eq!(headers.known().connection(), "keep-alive");
        assert_eq!(headers.connection_options(), ConnectionOptions::KEEP_ALIVE);
        assert_eq!(headers.known().cache_control(), "max-age=0");
        assert_eq!(
            headers.get("Sec-Ch-Ua").as_ref(),
            r##""#Not_A Brand";v="99", "Microsoft Edge";v="109", "Chromium";v="109""##
        );
        assert_eq!(headers.get("sec-ch-ua-mobile").as_ref(), "?0");
        assert_eq!(headers.get("sec-ch-ua-platform").as_ref(), "\"macOS\"");
        assert_eq!(headers.known().upgrade_insecure_requests(), "1");
        assert_eq!(
            headers.known().user_agent(),
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36 Edg/109.0.1518.52"
        );
        assert_eq!(headers.get("Sec-Fetch-Site").as_ref(), "none");
        assert_eq!(headers.get("Sec-Fetch-Mode").as_ref(), "navigate");
        assert_eq!(headers.get("Sec-Fetch-User").as_ref(), "?1");
        assert_eq!(headers.get("Sec-Fetch-Dest").as_ref(), "document");
        assert_eq!(headers.known().accept_encoding(), "gzip, deflate, br");
        assert_eq!(headers.known().accept_language(), "zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7");
    }

    #[test]
    fn repeated_header_lines_accumulate() {
        let str = indoc! {r##"
        GET / HTTP/1.1
        Host: localhost
        Cookie: a=1
        X-Forwarded-For: 10.0.0.1
        cookie: b=2
        x-forwarded-for: 10.0.0.2

        "##};

        let (header, _) = decode_complete(str);

        assert_eq!(header.headers().count(), 3);
        assert_eq!(header.headers().known().cookie().as_slice(), ["a=1", "b=2"]);
        assert_eq!(header.headers().get("X-Forwarded-For").as_slice(), ["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn content_length_body() {
        let str = indoc! {r##"
        POST /upload HTTP/1.1
        Host: localhost
        Content-Length: 12

        "##};

        let (header, payload_size) = decode_complete(str);
        assert_eq!(payload_size, PayloadSize::Length(12));
        assert_eq!(header.headers().content_length(), Some(12));
        assert_eq!(header.headers().count(), 2);
    }

    #[test]
    fn zero_content_length_is_empty() {
        let (_, payload_size) = decode_complete("POST / HTTP/1.1\r\nContent-Length: 0\r\n\r\n");
        assert_eq!(payload_size, PayloadSize::Empty);
    }

    #[test]
    fn repeated_equal_content_length_is_accepted() {
        let (_, payload_size) = decode_complete("POST / HTTP/1.1\r\nContent-Length: 3\r\nContent-Length: 3\r\n\r\n");
        assert_eq!(payload_size, PayloadSize::Length(3));
    }

    #[test]
    fn conflicting_content_length_is_rejected() {
        let result = decode("POST / HTTP/1.1\r\nContent-Length: 3\r\nContent-Length: 4\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidContentLength { .. })));
    }

    #[test]
    fn malformed_content_length_is_rejected() {
        for value in ["-1", "abc", "1.5", "+3", "18446744073709551616"] {
            let result = decode(&format!("POST / HTTP/1.1\r\nContent-Length: {value}\r\n\r\n"));
            assert!(matches!(result, Err(ParseError::InvalidContentLength { .. })), "{value}");
        }
    }

    #[test]
    fn chunked_body() {
        let str = indoc! {r##"
        POST /upload HTTP/1.1
        Host: localhost
        Transfer-Encoding: gzip, chunked

        "##};

        let (header, payload_size) = decode_complete(str);
        assert!(payload_size.is_chunked());
        assert_eq!(header.headers().transfer_coding(), TransferCoding::Chunked);
    }

    #[test]
    fn chunked_across_lines() {
        let (_, payload_size) = decode_complete("POST / HTTP/1.1\r\nTransfer-Encoding: gzip\r\nTransfer-Encoding: CHUNKED\r\n\r\n");
        assert_eq!(payload_size, PayloadSize::Chunked);
    }

    #[test]
    fn non_chunked_final_coding_is_rejected() {
        for value in ["chunked, gzip", "gzip", "chunked2", ""] {
            let result = decode(&format!("POST / HTTP/1.1\r\nTransfer-Encoding: {value}\r\n\r\n"));
            assert!(matches!(result, Err(ParseError::InvalidFraming { .. })), "{value:?}");
        }
    }

    #[test]
    fn transfer_encoding_with_content_length_is_rejected() {
        let str = indoc! {r##"
        POST / HTTP/1.1
        Content-Length: 5
        Transfer-Encoding: chunked

        "##};

        assert!(matches!(decode(str), Err(ParseError::InvalidFraming { .. })));
    }

    #[test]
    fn http10_transfer_encoding_is_rejected() {
        let result = decode("POST / HTTP/1.0\r\nTransfer-Encoding: chunked\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidFraming { .. })));

        let (_, payload_size) = decode_complete("POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n");
        assert_eq!(payload_size, PayloadSize::Chunked);

        let (_, payload_size) = decode_complete("POST / HTTP/1.0\r\nContent-Length: 4\r\n\r\n");
        assert_eq!(payload_size, PayloadSize::Length(4));
    }

    #[test]
    fn http10_request() {
        let (header, _) = decode_complete("GET / HTTP/1.0\r\nConnection: keep-alive\r\n\r\n");
        assert_eq!(header.version(), Version::HTTP_10);
        assert!(header.keep_alive());

        let (header, _) = decode_complete("GET / HTTP/1.0\r\nHost: localhost\r\n\r\n");
        assert!(!header.keep_alive());
    }

    #[test]
    fn too_many_headers() {
        let decoder_config = DecoderConfig::default().with_max_headers(2);
        let mut decoder = HeaderDecoder::with_config(decoder_config);

        let mut bytes = BytesMut::from("GET / HTTP/1.1\r\nA: 1\r\nB: 2\r\nC: 3\r\n\r\n");
        assert!(matches!(decoder.decode(&mut bytes), Err(ParseError::TooManyHeaders { max_num: 2 })));

        let mut bytes = BytesMut::from("GET / HTTP/1.1\r\nA: 1\r\nB: 2\r\n\r\n");
        assert!(decoder.decode(&mut bytes).unwrap().is_some());
    }

    #[test]
    fn max_headers_is_capped() {
        assert_eq!(DecoderConfig::default().with_max_headers(1000).max_headers, 64);
    }

    #[test]
    fn too_large_head() {
        let mut decoder = HeaderDecoder::with_config(DecoderConfig::default().with_max_header_bytes(32));

        let mut partial = BytesMut::from("GET / HTTP/1.1\r\nX-Padding: aaaaaaaaaaaaaaaaaaaaaaaa");
        assert!(matches!(decoder.decode(&mut partial), Err(ParseError::TooLargeHeader { max_size: 32, .. })));

        let mut complete = BytesMut::from("GET / HTTP/1.1\r\nX-Padding: aaaaaaaaaaaaaaaa\r\n\r\n");
        assert!(matches!(decoder.decode(&mut complete), Err(ParseError::TooLargeHeader { max_size: 32, .. })));
    }

    #[test]
    fn non_ascii_value_needs_opt_in() {
        let str = "GET / HTTP/1.1\r\nX-Name: café\r\n\r\n";

        let result = decode(str);
        assert!(matches!(result, Err(ParseError::Header { source: HeaderError::InvalidCharacter { ch: 'é' } })));

        let mut decoder = HeaderDecoder::with_config(DecoderConfig::default().with_non_ascii_values(true));
        let (header, _) = decoder.decode(&mut BytesMut::from(str)).unwrap().unwrap();
        assert_eq!(header.headers().get("x-name").as_ref(), "café");
    }

    #[test]
    fn invalid_request_line() {
        assert!(matches!(decode("GET / HTTP/2.0\r\nHost: localhost\r\n\r\n"), Err(ParseError::InvalidHeader { .. })));
        assert!(matches!(decode("GET / HTTP/1.1\r\nBad Name: x\r\n\r\n"), Err(ParseError::InvalidHeader { .. })));
    }

    #[test]
    fn decoder_is_reusable() {
        let mut decoder = HeaderDecoder::new();
        let mut bytes = BytesMut::from("GET /a HTTP/1.1\r\nX-A: 1\r\n\r\nGET /b HTTP/1.1\r\nX-B: 2\r\n\r\n");

        let (first, _) = decoder.decode(&mut bytes).unwrap().unwrap();
        let (second, _) = decoder.decode(&mut bytes).unwrap().unwrap();

        assert_eq!(first.uri().path(), "/a");
        assert!(first.headers().contains("X-A"));
        assert_eq!(second.uri().path(), "/b");
        assert!(!second.headers().contains("X-A"));
        assert!(second.headers().contains("X-B"));
        assert!(bytes.is_empty());
    }
}
