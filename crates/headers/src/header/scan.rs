//! Byte level helpers shared by the `Connection` and `Transfer-Encoding` scanners.
//!
//! Both headers are comma separated lists of tokens. The scanners walk the raw
//! bytes of each value once, without splitting or allocating.

/// Returns the index of the first byte at or after `offset` that is neither a
/// space nor a comma. Returns `bytes.len()` when only separators remain.
#[inline]
pub(crate) fn skip_separators(bytes: &[u8], mut offset: usize) -> usize {
    while offset < bytes.len() && matches!(bytes[offset], b' ' | b',') {
        offset += 1;
    }
    offset
}

/// Compares the bytes starting at `offset` with a lowercase ASCII `literal`.
///
/// Letters match in either case by folding with `| 0x20`; every other byte of the
/// literal (such as the `-` in `keep-alive`) must match exactly. Returns false
/// when fewer than `literal.len()` bytes remain.
#[inline]
pub(crate) fn matches_literal(bytes: &[u8], offset: usize, literal: &[u8]) -> bool {
    let Some(window) = bytes.get(offset..).and_then(|rest| rest.get(..literal.len())) else {
        return false;
    };

    window.iter().zip(literal).all(|(&byte, &expected)| {
        if expected.is_ascii_lowercase() { byte | 0x20 == expected } else { byte == expected }
    })
}

/// Walks from `offset` to the end of the current token.
///
/// Returns the index of the delimiting comma (or `bytes.len()`), and whether every
/// byte between `offset` and the delimiter was a space.
#[inline]
pub(crate) fn token_tail(bytes: &[u8], mut offset: usize) -> (usize, bool) {
    let mut only_spaces = true;
    while offset < bytes.len() {
        match bytes[offset] {
            b',' => break,
            b' ' => {}
            _ => only_spaces = false,
        }
        offset += 1;
    }
    (offset, only_spaces)
}
