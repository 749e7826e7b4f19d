//! `Connection` header option scanning.
//!
//! refer: <https://www.rfc-editor.org/rfc/rfc9110.html#name-connection>

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::header::FieldValues;
use crate::header::scan::{matches_literal, skip_separators, token_tail};

/// The connection options this layer acts on, as a set of flags.
///
/// The flags are independent: a header such as `Connection: keep-alive, close`
/// yields both [`KEEP_ALIVE`](Self::KEEP_ALIVE) and [`CLOSE`](Self::CLOSE), and
/// deciding which one wins is left to the caller.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConnectionOptions(u8);

impl ConnectionOptions {
    pub const NONE: Self = Self(0);
    pub const KEEP_ALIVE: Self = Self(1);
    pub const UPGRADE: Self = Self(1 << 1);
    pub const CLOSE: Self = Self(1 << 2);

    /// Returns true if every flag of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for ConnectionOptions {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitOrAssign for ConnectionOptions {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("NONE");
        }

        let names = [(Self::KEEP_ALIVE, "KEEP_ALIVE"), (Self::UPGRADE, "UPGRADE"), (Self::CLOSE, "CLOSE")];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Scans every instance of a `Connection` header and returns the union of the
/// recognised options.
///
/// Each comma separated token may carry leading and trailing spaces. A token
/// counts only when it is exactly `keep-alive`, `upgrade` or `close` (ASCII case
/// insensitive); `keep-alive-x` or `closed` contribute nothing. Unknown options
/// are legal HTTP and are ignored rather than reported.
///
/// # Example
///
/// ```
/// use micro_headers::header::{parse_connection, ConnectionOptions, FieldValues};
///
/// let options = parse_connection(&FieldValues::from("Upgrade, close"));
/// assert_eq!(options, ConnectionOptions::UPGRADE | ConnectionOptions::CLOSE);
/// ```
pub fn parse_connection(values: &FieldValues) -> ConnectionOptions {
    let mut options = ConnectionOptions::NONE;

    for value in values {
        let bytes = value.as_bytes();
        let mut offset = skip_separators(bytes, 0);

        while offset < bytes.len() {
            let (candidate, matched_len) = match bytes[offset] | 0x20 {
                b'k' if matches_literal(bytes, offset + 1, b"eep-alive") => (ConnectionOptions::KEEP_ALIVE, 10),
                b'u' if matches_literal(bytes, offset + 1, b"pgrade") => (ConnectionOptions::UPGRADE, 7),
                b'c' if matches_literal(bytes, offset + 1, b"lose") => (ConnectionOptions::CLOSE, 5),
                _ => (ConnectionOptions::NONE, 0),
            };

            let (delimiter, only_spaces) = token_tail(bytes, offset + matched_len);
            if only_spaces {
                options |= candidate;
            }

            offset = skip_separators(bytes, delimiter);
        }
    }

    options
}
