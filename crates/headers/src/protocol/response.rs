//! HTTP response head.

use http::{StatusCode, Version};

use crate::header::ResponseHeaders;

/// The status line and headers of an HTTP/1.x response, before the body is attached.
#[derive(Debug, Clone)]
pub struct ResponseHead {
    status: StatusCode,
    version: Version,
    headers: ResponseHeaders,
}

impl ResponseHead {
    /// Creates an HTTP/1.1 response head with no headers.
    pub fn new(status: StatusCode) -> Self {
        Self { status, version: Version::HTTP_11, headers: ResponseHeaders::new() }
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &ResponseHeaders {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut ResponseHeaders {
        &mut self.headers
    }
}

impl Default for ResponseHead {
    fn default() -> Self {
        Self::new(StatusCode::OK)
    }
}
