//! The header collection.
//!
//! [`HttpHeaders`] combines three stores behind one case-insensitive dictionary:
//!
//! - the known header slots of a [`KnownHeaders`] layout, tracked by a 64-bit
//!   presence word,
//! - a numeric `Content-Length` slot, read on every request and never stored as text,
//! - a lazily created, insertion ordered fallback map for every other name.
//!
//! A collection is filled while a message is parsed, marked read-only once the
//! message is complete so it can be shared with any number of readers, and
//! [`reset`](HttpHeaders::reset) before it is reused for the next message on the
//! same connection. Resetting keeps the fallback map's allocation.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::{Equivalent, IndexMap};

use crate::ensure;
use crate::header::field::EMPTY_FIELD;
use crate::header::known::AddFast;
use crate::header::{
    ConnectionOptions, FieldValues, KnownHeaders, NoKnownHeaders, RequestHeaderSlots, ResponseHeaderSlots,
    TransferCoding, final_transfer_coding, parse_connection,
};
use crate::protocol::HeaderError;

/// Canonical name of the header kept in the numeric content-length slot.
pub const CONTENT_LENGTH: &str = "Content-Length";

/// Header collection for requests.
pub type RequestHeaders = HttpHeaders<RequestHeaderSlots>;

/// Header collection for responses.
pub type ResponseHeaders = HttpHeaders<ResponseHeaderSlots>;

/// A case-insensitive dictionary from header names to [`FieldValues`].
///
/// # Example
///
/// ```
/// use micro_headers::header::{FieldValues, RequestHeaders};
/// use micro_headers::protocol::HeaderError;
///
/// let mut headers = RequestHeaders::new();
/// headers.set("host", "example.com").unwrap();
/// headers.set("X-Request-Id", "42").unwrap();
/// headers.set_content_length(Some(0)).unwrap();
///
/// assert_eq!(headers.get("HOST").as_ref(), "example.com");
/// assert_eq!(headers.count(), 3);
///
/// headers.set_read_only();
/// assert_eq!(headers.remove("host"), Err(HeaderError::ReadOnly));
///
/// headers.reset();
/// assert_eq!(headers.count(), 0);
/// assert!(!headers.is_read_only());
/// ```
#[derive(Clone, Default)]
pub struct HttpHeaders<K = NoKnownHeaders> {
    bits: u64,
    content_length: Option<u64>,
    read_only: bool,
    unknown: Option<IndexMap<HeaderKey, FieldValues>>,
    known: K,
}

impl<K: KnownHeaders> HttpHeaders<K> {
    /// Creates an empty collection. The fallback map is not allocated until the
    /// first unknown name is stored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the known-header layout, for typed access to its slots.
    #[inline]
    pub fn known(&self) -> &K {
        &self.known
    }

    /// Returns the field stored under `name`, or the empty field when absent.
    ///
    /// Stored fields are borrowed. `Content-Length` is formatted from its numeric
    /// slot and returned owned.
    pub fn get(&self, name: &str) -> Cow<'_, FieldValues> {
        self.try_get(name).unwrap_or(Cow::Borrowed(&EMPTY_FIELD))
    }

    /// Like [`get`](Self::get), but fails with [`HeaderError::KeyNotFound`] when absent.
    pub fn get_strict(&self, name: &str) -> Result<Cow<'_, FieldValues>, HeaderError> {
        self.try_get(name).ok_or_else(|| HeaderError::key_not_found(name))
    }

    /// Returns the field stored under `name`, if any.
    pub fn try_get(&self, name: &str) -> Option<Cow<'_, FieldValues>> {
        if is_content_length(name) {
            return self.content_length.map(|length| Cow::Owned(FieldValues::from(length.to_string())));
        }

        if let Some(value) = self.known.get_fast(self.bits, name) {
            return Some(Cow::Borrowed(value));
        }

        self.unknown.as_ref()?.get(&UncasedStr(name)).map(Cow::Borrowed)
    }

    pub fn contains(&self, name: &str) -> bool {
        if is_content_length(name) {
            return self.content_length.is_some();
        }

        match self.known.contains_fast(self.bits, name) {
            Some(present) => present,
            None => self.unknown.as_ref().is_some_and(|unknown| unknown.contains_key(&UncasedStr(name))),
        }
    }

    /// Returns the number of distinct header names present.
    pub fn count(&self) -> usize {
        K::count_fast(self.bits)
            + usize::from(self.content_length.is_some())
            + self.unknown.as_ref().map_or(0, IndexMap::len)
    }

    /// Returns true if no header is present.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Stores `value` under `name`, replacing any previous value.
    ///
    /// Storing an empty field removes `name`.
    ///
    /// # Errors
    ///
    /// - [`HeaderError::ReadOnly`] if the collection is read-only
    /// - [`HeaderError::InvalidName`] if `name` is empty
    /// - [`HeaderError::InvalidContentLength`] if `name` is `Content-Length` and
    ///   `value` is not a single non-negative integer
    pub fn set<V: Into<FieldValues>>(&mut self, name: &str, value: V) -> Result<(), HeaderError> {
        ensure!(!self.read_only, HeaderError::ReadOnly);
        ensure!(!name.is_empty(), HeaderError::InvalidName);

        let value = value.into();
        if value.is_empty() {
            self.remove_unchecked(name);
            return Ok(());
        }

        if is_content_length(name) {
            self.content_length = Some(parse_content_length(&value)?);
            return Ok(());
        }

        if let Err(value) = self.known.set_fast(&mut self.bits, name, value) {
            self.unknown_mut().insert(HeaderKey::from(name), value);
        }
        Ok(())
    }

    /// Stores `value` under `name` only if `name` is not present yet.
    ///
    /// Adding an empty field changes nothing.
    ///
    /// # Errors
    ///
    /// As [`set`](Self::set), plus [`HeaderError::DuplicateKey`] if `name` already
    /// has a value.
    pub fn add<V: Into<FieldValues>>(&mut self, name: &str, value: V) -> Result<(), HeaderError> {
        ensure!(!self.read_only, HeaderError::ReadOnly);
        ensure!(!name.is_empty(), HeaderError::InvalidName);

        let value = value.into();
        if value.is_empty() {
            return Ok(());
        }

        if is_content_length(name) {
            ensure!(self.content_length.is_none(), HeaderError::duplicate_key(name));
            self.content_length = Some(parse_content_length(&value)?);
            return Ok(());
        }

        match self.known.add_fast(&mut self.bits, name, value) {
            AddFast::Added => Ok(()),
            AddFast::Occupied => Err(HeaderError::duplicate_key(name)),
            AddFast::Unknown(value) => {
                let unknown = self.unknown_mut();
                ensure!(!unknown.contains_key(&UncasedStr(name)), HeaderError::duplicate_key(name));
                unknown.insert(HeaderKey::from(name), value);
                Ok(())
            }
        }
    }

    /// Appends one value to the field stored under `name`, creating it if absent.
    ///
    /// This is how a parser records a header line: a name repeated on the wire
    /// accumulates its values in order. Repeated `Content-Length` values must agree.
    ///
    /// # Errors
    ///
    /// - [`HeaderError::ReadOnly`] if the collection is read-only
    /// - [`HeaderError::InvalidName`] if `name` is empty
    /// - [`HeaderError::InvalidContentLength`] if `name` is `Content-Length` and
    ///   `value` is not a non-negative integer, or differs from the stored length
    pub fn append<S: Into<String>>(&mut self, name: &str, value: S) -> Result<(), HeaderError> {
        ensure!(!self.read_only, HeaderError::ReadOnly);
        ensure!(!name.is_empty(), HeaderError::InvalidName);

        let value = value.into();
        if is_content_length(name) {
            let length = parse_digits(&value).ok_or_else(|| HeaderError::invalid_content_length(&value))?;
            ensure!(
                self.content_length.is_none_or(|current| current == length),
                HeaderError::invalid_content_length(&value)
            );
            self.content_length = Some(length);
            return Ok(());
        }

        if let Err(value) = self.known.append_fast(&mut self.bits, name, value) {
            self.unknown_mut().entry(HeaderKey::from(name)).or_default().push(value);
        }
        Ok(())
    }

    /// Removes `name`, returning whether it was present.
    ///
    /// # Errors
    ///
    /// [`HeaderError::ReadOnly`] if the collection is read-only.
    pub fn remove(&mut self, name: &str) -> Result<bool, HeaderError> {
        ensure!(!self.read_only, HeaderError::ReadOnly);
        Ok(self.remove_unchecked(name))
    }

    fn remove_unchecked(&mut self, name: &str) -> bool {
        if is_content_length(name) {
            return self.content_length.take().is_some();
        }

        if let Some(removed) = self.known.remove_fast(&mut self.bits, name) {
            return removed;
        }

        self.unknown.as_mut().is_some_and(|unknown| unknown.shift_remove(&UncasedStr(name)).is_some())
    }

    /// Removes every header.
    ///
    /// # Errors
    ///
    /// [`HeaderError::ReadOnly`] if the collection is read-only.
    pub fn clear(&mut self) -> Result<(), HeaderError> {
        ensure!(!self.read_only, HeaderError::ReadOnly);

        self.known.clear_fast(&mut self.bits);
        self.content_length = None;
        if let Some(unknown) = &mut self.unknown {
            unknown.clear();
        }
        Ok(())
    }

    /// Returns the content length, if one is set.
    #[inline]
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Sets or clears the content length.
    ///
    /// # Errors
    ///
    /// - [`HeaderError::ReadOnly`] if the collection is read-only
    /// - [`HeaderError::InvalidContentLength`] if `length` is negative
    pub fn set_content_length(&mut self, length: Option<i64>) -> Result<(), HeaderError> {
        ensure!(!self.read_only, HeaderError::ReadOnly);

        self.content_length = match length {
            Some(length) => Some(u64::try_from(length).ok().ok_or_else(|| HeaderError::invalid_content_length(length))?),
            None => None,
        };
        Ok(())
    }

    /// Forbids every further mutation until [`reset`](Self::reset).
    #[inline]
    pub fn set_read_only(&mut self) {
        self.read_only = true;
    }

    #[inline]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Returns the collection to its freshly constructed state so it can hold the
    /// next message.
    pub fn reset(&mut self) {
        self.read_only = false;
        self.known.clear_fast(&mut self.bits);
        self.content_length = None;
        if let Some(unknown) = &mut self.unknown {
            unknown.clear();
        }
    }

    /// Scans the `Connection` header.
    pub fn connection_options(&self) -> ConnectionOptions {
        parse_connection(&self.get("Connection"))
    }

    /// Classifies the final `Transfer-Encoding` coding.
    pub fn transfer_coding(&self) -> TransferCoding {
        final_transfer_coding(&self.get("Transfer-Encoding"))
    }

    /// Iterates over every present header: known slots in layout order, then
    /// `Content-Length`, then other names in insertion order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            known: &self.known,
            remaining_bits: self.bits,
            content_length: self.content_length,
            unknown: self.unknown.as_ref().map(IndexMap::iter),
        }
    }

    fn unknown_mut(&mut self) -> &mut IndexMap<HeaderKey, FieldValues> {
        self.unknown.get_or_insert_with(IndexMap::new)
    }
}

impl<K: KnownHeaders> fmt::Debug for HttpHeaders<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K: KnownHeaders> IntoIterator for &'a HttpHeaders<K> {
    type Item = (&'a str, Cow<'a, FieldValues>);
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of an [`HttpHeaders`].
#[derive(Debug)]
pub struct Iter<'a, K> {
    known: &'a K,
    remaining_bits: u64,
    content_length: Option<u64>,
    unknown: Option<indexmap::map::Iter<'a, HeaderKey, FieldValues>>,
}

impl<'a, K: KnownHeaders> Iterator for Iter<'a, K> {
    type Item = (&'a str, Cow<'a, FieldValues>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining_bits != 0 {
            let index = self.remaining_bits.trailing_zeros() as usize;
            self.remaining_bits &= self.remaining_bits - 1;
            return Some((K::NAMES[index], Cow::Borrowed(&self.known.slots()[index])));
        }

        if let Some(length) = self.content_length.take() {
            return Some((CONTENT_LENGTH, Cow::Owned(FieldValues::from(length.to_string()))));
        }

        let (key, value) = self.unknown.as_mut()?.next()?;
        Some((key.as_str(), Cow::Borrowed(value)))
    }
}

#[inline]
fn is_content_length(name: &str) -> bool {
    name.eq_ignore_ascii_case(CONTENT_LENGTH)
}

fn parse_content_length(value: &FieldValues) -> Result<u64, HeaderError> {
    match value.as_slice() {
        [single] => parse_digits(single).ok_or_else(|| HeaderError::invalid_content_length(single)),
        _ => Err(HeaderError::invalid_content_length(value)),
    }
}

/// Parses a decimal `u64`, rejecting signs, whitespace and overflow.
fn parse_digits(value: &str) -> Option<u64> {
    if value.is_empty() {
        return None;
    }

    value.bytes().try_fold(0u64, |length, byte| {
        let digit = match byte {
            b'0'..=b'9' => u64::from(byte - b'0'),
            _ => return None,
        };
        length.checked_mul(10)?.checked_add(digit)
    })
}

/// Fallback map key: keeps the name as first inserted, hashes and compares
/// ASCII case-insensitively.
#[derive(Debug, Clone)]
pub(crate) struct HeaderKey(String);

impl HeaderKey {
    fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HeaderKey {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl PartialEq for HeaderKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for HeaderKey {}

impl Hash for HeaderKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_uncased(&self.0, state);
    }
}

/// Borrowed lookup key, so queries never allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UncasedStr<'a>(&'a str);

impl Hash for UncasedStr<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_uncased(self.0, state);
    }
}

impl Equivalent<HeaderKey> for UncasedStr<'_> {
    fn equivalent(&self, key: &HeaderKey) -> bool {
        self.0.eq_ignore_ascii_case(&key.0)
    }
}

fn hash_uncased<H: Hasher>(name: &str, state: &mut H) {
    for byte in name.bytes() {
        state.write_u8(byte.to_ascii_lowercase());
    }
    state.write_u8(0xff);
}
