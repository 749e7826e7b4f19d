//! HTTP/1.1 header storage and header-level parsing.
//!
//! - [`HttpHeaders`]: the case-insensitive header collection, with a known-header
//!   fast path and a numeric `Content-Length` slot
//! - [`FieldValues`]: the value of one header field, one or more strings
//! - [`parse_connection`] and [`final_transfer_coding`]: allocation-free scanners
//!   for the two headers that drive connection management and body framing
//! - [`validate`]: character rules for names and values

mod connection;
mod field;
mod known;
mod map;
mod scan;
mod slots;
mod transfer_coding;
pub mod validate;

pub use connection::{ConnectionOptions, parse_connection};
pub use field::{FieldValues, Iter as FieldIter};
pub use known::{AddFast, KnownHeaders, NoKnownHeaders};
pub use map::{CONTENT_LENGTH, HttpHeaders, Iter, RequestHeaders, ResponseHeaders};
pub use slots::{RequestHeaderSlots, ResponseHeaderSlots};
pub use transfer_coding::{TransferCoding, final_transfer_coding};
