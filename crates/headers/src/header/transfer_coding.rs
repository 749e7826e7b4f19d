//! `Transfer-Encoding` classification.
//!
//! Only the final transfer coding decides how a message body is framed, and
//! `chunked` is the only coding this layer frames itself. Anything else after
//! the last `chunked` means the body length cannot be determined, which the
//! decoder must treat as an error rather than guess.
//!
//! refer: <https://www.rfc-editor.org/rfc/rfc9112.html#name-transfer-encoding>

use crate::header::FieldValues;
use crate::header::scan::{matches_literal, skip_separators, token_tail};

/// Length of the `chunked` literal.
const CHUNKED_LEN: usize = 7;

/// Classification of the last transfer coding applied to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransferCoding {
    /// No transfer coding was specified.
    #[default]
    None,
    /// The final coding is `chunked`.
    Chunked,
    /// The final coding is something other than `chunked`.
    Other,
}

impl TransferCoding {
    #[inline]
    pub fn is_chunked(self) -> bool {
        matches!(self, TransferCoding::Chunked)
    }
}

/// Scans every instance of a `Transfer-Encoding` header, in order, and classifies
/// the last coding.
///
/// Tokens are consumed strictly left to right and each non-empty token overwrites
/// the running result, so `gzip, chunked` is [`TransferCoding::Chunked`] while
/// `chunked, gzip` is [`TransferCoding::Other`]. A token is `chunked` only when the
/// seven letters match (ASCII case insensitive) and nothing but spaces follows up
/// to the next comma; `chunked2` is `Other`. Empty list elements are skipped.
///
/// # Example
///
/// ```
/// use micro_headers::header::{final_transfer_coding, FieldValues, TransferCoding};
///
/// assert_eq!(final_transfer_coding(&FieldValues::from("gzip, chunked")), TransferCoding::Chunked);
/// assert_eq!(final_transfer_coding(&FieldValues::from("chunked, gzip")), TransferCoding::Other);
/// assert_eq!(final_transfer_coding(&FieldValues::new()), TransferCoding::None);
/// ```
pub fn final_transfer_coding(values: &FieldValues) -> TransferCoding {
    let mut coding = TransferCoding::None;

    for value in values {
        let bytes = value.as_bytes();
        let mut offset = skip_separators(bytes, 0);

        while offset < bytes.len() {
            let matched_len = if bytes[offset] | 0x20 == b'c'
                && matches_literal(bytes, offset + 1, b"hunk")
                && matches_literal(bytes, offset + 5, b"ed")
            {
                CHUNKED_LEN
            } else {
                0
            };

            let (delimiter, only_spaces) = token_tail(bytes, offset + matched_len);
            coding = if matched_len == CHUNKED_LEN && only_spaces { TransferCoding::Chunked } else { TransferCoding::Other };

            offset = skip_separators(bytes, delimiter);
        }
    }

    coding
}
