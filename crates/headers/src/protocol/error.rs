use std::io;
use thiserror::Error;

/// Errors raised by the header collection and the character validators.
///
/// Every mutating operation on [`HttpHeaders`](crate::header::HttpHeaders) checks
/// its preconditions before touching any state, so receiving one of these errors
/// means the collection is exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("the header collection is read-only")]
    ReadOnly,

    #[error("header name must not be empty")]
    InvalidName,

    #[error("invalid content-length: {value}")]
    InvalidContentLength { value: String },

    #[error("an entry with the header name {name} already exists")]
    DuplicateKey { name: String },

    #[error("the header {name} is not present")]
    KeyNotFound { name: String },

    #[error("invalid character in header: {}", code_point(.ch))]
    InvalidCharacter { ch: char },
}

fn code_point(ch: &char) -> String {
    format!("0x{:04X}", u32::from(*ch))
}

impl HeaderError {
    pub fn invalid_content_length<S: ToString>(value: S) -> Self {
        Self::InvalidContentLength { value: value.to_string() }
    }

    pub fn duplicate_key<S: ToString>(name: S) -> Self {
        Self::DuplicateKey { name: name.to_string() }
    }

    pub fn key_not_found<S: ToString>(name: S) -> Self {
        Self::KeyNotFound { name: name.to_string() }
    }

    pub fn invalid_character(ch: char) -> Self {
        Self::InvalidCharacter { ch }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("header size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("invalid http version: {0:?}")]
    InvalidVersion(Option<u8>),

    #[error("invalid http method")]
    InvalidMethod,

    #[error("invalid http uri")]
    InvalidUri,

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("invalid body framing: {reason}")]
    InvalidFraming { reason: String },

    #[error("header error: {source}")]
    Header {
        #[from]
        source: HeaderError,
    },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    pub fn invalid_framing<S: ToString>(str: S) -> Self {
        Self::InvalidFraming { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("unsupported http version: {version:?}")]
    UnsupportedVersion { version: http::Version },

    #[error("invalid body framing: {reason}")]
    InvalidFraming { reason: String },

    #[error("header error: {source}")]
    Header {
        #[from]
        source: HeaderError,
    },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn unsupported_version(version: http::Version) -> Self {
        Self::UnsupportedVersion { version }
    }

    pub fn invalid_framing<S: ToString>(str: S) -> Self {
        Self::InvalidFraming { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
