//! Message heads and the errors raised while building them.
//!
//! - [`RequestHead`]: request line plus a read-only [`RequestHeaders`](crate::header::RequestHeaders)
//! - [`ResponseHead`]: status line plus a [`ResponseHeaders`](crate::header::ResponseHeaders)
//! - [`PayloadSize`]: the body framing decided from the headers
//! - [`HeaderError`], [`ParseError`], [`SendError`]: error types of the collection,
//!   the decoder and the encoder

mod message;
pub use message::PayloadSize;

mod request;
pub use request::RequestHead;

mod response;
pub use response::ResponseHead;

mod error;
pub use error::HeaderError;
pub use error::ParseError;
pub use error::SendError;
