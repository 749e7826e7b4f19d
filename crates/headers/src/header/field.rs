//! The multi-value header field.
//!
//! HTTP allows a header name to appear more than once in a message, and a single
//! occurrence may itself carry a comma separated list. [`FieldValues`] keeps every
//! occurrence exactly as it was given, in insertion order, without merging them.
//!
//! Nearly all fields carry exactly one value, so that case is stored inline and
//! never touches a `Vec`.

use std::fmt;
use std::slice;

/// An ordered, possibly empty sequence of header values for one header name.
///
/// A field holding one value and a field holding a one-element sequence are the
/// same thing to callers: equality compares the value sequences.
///
/// # Example
///
/// ```
/// use micro_headers::header::FieldValues;
///
/// let mut field = FieldValues::from("gzip");
/// field.push("chunked");
///
/// assert_eq!(field.len(), 2);
/// assert_eq!(field.iter().collect::<Vec<_>>(), ["gzip", "chunked"]);
/// assert_eq!(field, FieldValues::from(["gzip", "chunked"]));
/// ```
#[derive(Clone, Default)]
pub struct FieldValues {
    repr: Repr,
}

#[derive(Clone, Default)]
enum Repr {
    #[default]
    Empty,
    One(String),
    // always holds at least two values
    Many(Vec<String>),
}

pub(crate) static EMPTY_FIELD: FieldValues = FieldValues::new();

impl FieldValues {
    /// Creates an empty field.
    pub const fn new() -> Self {
        Self { repr: Repr::Empty }
    }

    /// Returns the number of values in this field.
    #[inline]
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Empty => 0,
            Repr::One(_) => 1,
            Repr::Many(values) => values.len(),
        }
    }

    /// Returns true if this field holds no value at all.
    ///
    /// Note that a field holding one empty string is *not* empty: `X-Foo:` on the
    /// wire is a present header with an empty value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self.repr, Repr::Empty)
    }

    /// Returns the values as a slice of strings.
    pub fn as_slice(&self) -> &[String] {
        match &self.repr {
            Repr::Empty => &[],
            Repr::One(value) => slice::from_ref(value),
            Repr::Many(values) => values,
        }
    }

    /// Returns the value at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.as_slice().get(index).map(String::as_str)
    }

    /// Returns the first value, if any.
    pub fn first(&self) -> Option<&str> {
        self.get(0)
    }

    /// Returns the last value, if any.
    pub fn last(&self) -> Option<&str> {
        self.as_slice().last().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.as_slice().iter() }
    }

    /// Appends one value, keeping every value already present.
    pub fn push<S: Into<String>>(&mut self, value: S) {
        let value = value.into();
        self.repr = match std::mem::take(&mut self.repr) {
            Repr::Empty => Repr::One(value),
            Repr::One(first) => Repr::Many(vec![first, value]),
            Repr::Many(mut values) => {
                values.push(value);
                Repr::Many(values)
            }
        };
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.repr = Repr::Empty;
    }
}

impl PartialEq for FieldValues {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for FieldValues {}

impl PartialEq<str> for FieldValues {
    /// A field equals a string when it holds exactly that one value.
    fn eq(&self, other: &str) -> bool {
        matches!(self.as_slice(), [value] if value == other)
    }
}

impl PartialEq<&str> for FieldValues {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl fmt::Debug for FieldValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_slice() {
            [value] => fmt::Debug::fmt(value, f),
            values => f.debug_list().entries(values).finish(),
        }
    }
}

/// Joins the values with `", "`, the way a single combined field line would read.
impl fmt::Display for FieldValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, value) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(value)?;
        }
        Ok(())
    }
}

impl From<String> for FieldValues {
    #[inline]
    fn from(value: String) -> Self {
        Self { repr: Repr::One(value) }
    }
}

impl From<&str> for FieldValues {
    #[inline]
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<Vec<String>> for FieldValues {
    fn from(mut values: Vec<String>) -> Self {
        let repr = match values.len() {
            0 => Repr::Empty,
            1 => Repr::One(values.swap_remove(0)),
            _ => Repr::Many(values),
        };
        Self { repr }
    }
}

impl From<&[&str]> for FieldValues {
    fn from(values: &[&str]) -> Self {
        values.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for FieldValues {
    fn from(values: [&str; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for FieldValues {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut field = FieldValues::new();
        for value in iter {
            field.push(value);
        }
        field
    }
}

impl<'a> IntoIterator for &'a FieldValues {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the values of a [`FieldValues`], in insertion order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(String::as_str)
    }
}

impl ExactSizeIterator for Iter<'_> {}
