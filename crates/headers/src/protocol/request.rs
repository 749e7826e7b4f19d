//! HTTP request head.
//!
//! A [`RequestHead`] is what the decoder hands out once the request line and
//! every header line have been parsed. Its headers are already read-only, so the
//! head can be shared with the body reader and the handler without copying.

use http::{Method, Uri, Version};

use crate::header::{ConnectionOptions, RequestHeaders};

const CONTINUE: &str = "100-continue";

/// The request line and headers of an HTTP/1.x request.
#[derive(Debug, Clone)]
pub struct RequestHead {
    method: Method,
    uri: Uri,
    version: Version,
    headers: RequestHeaders,
}

impl RequestHead {
    pub fn new(method: Method, uri: Uri, version: Version, headers: RequestHeaders) -> Self {
        Self { method, uri, version, headers }
    }

    /// Returns a reference to the request's HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns a reference to the request's URI.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the request's HTTP version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns a reference to the request's headers.
    pub fn headers(&self) -> &RequestHeaders {
        &self.headers
    }

    /// Consumes the head, returning its parts.
    pub fn into_parts(self) -> (Method, Uri, Version, RequestHeaders) {
        (self.method, self.uri, self.version, self.headers)
    }

    /// Determines if the connection may serve another request after this one.
    ///
    /// HTTP/1.1 connections are persistent unless the client sends
    /// `Connection: close`. HTTP/1.0 connections are persistent only when the client
    /// asks for `keep-alive` and does not also ask to `close`.
    pub fn keep_alive(&self) -> bool {
        let options = self.headers.connection_options();
        match self.version {
            Version::HTTP_11 => !options.contains(ConnectionOptions::CLOSE),
            Version::HTTP_10 => options.contains(ConnectionOptions::KEEP_ALIVE) && !options.contains(ConnectionOptions::CLOSE),
            _ => false,
        }
    }

    /// Returns true if the client asks to switch protocols: `Connection` lists
    /// `upgrade` and an `Upgrade` header names the target.
    pub fn is_upgrade(&self) -> bool {
        self.headers.connection_options().contains(ConnectionOptions::UPGRADE) && !self.headers.known().upgrade().is_empty()
    }

    /// Returns true if an HTTP/1.1 client waits for `100 Continue` before sending
    /// its body.
    pub fn expect_continue(&self) -> bool {
        self.version == Version::HTTP_11
            && self.headers.known().expect().iter().any(|value| value.trim().eq_ignore_ascii_case(CONTINUE))
    }
}
