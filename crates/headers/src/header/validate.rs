//! Character validation for header names and values.
//!
//! The collection never validates on `set`/`add`: the wire decoder, or any caller
//! building headers programmatically, runs these checks once per field before
//! insertion.
//!
//! refer: <https://www.rfc-editor.org/rfc/rfc9110.html#name-tokens> and
//! <https://www.rfc-editor.org/rfc/rfc9110.html#name-field-values>

use crate::header::FieldValues;
use crate::protocol::HeaderError;

/// Returns true if `ch` may appear in a header name (an RFC 9110 `tchar`).
#[inline]
pub fn is_token_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(ch, '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '|' | '~')
}

/// Returns true if `ch` may appear in a header value.
///
/// Visible ASCII, space and horizontal tab are always allowed. Any other control
/// byte is rejected. Non-ASCII characters are only allowed when `allow_non_ascii`
/// is set.
#[inline]
pub fn is_field_value_char(ch: char, allow_non_ascii: bool) -> bool {
    match ch {
        '\t' | ' '..='~' => true,
        _ => allow_non_ascii && !ch.is_ascii(),
    }
}

/// Fails with [`HeaderError::InvalidCharacter`] on the first character of `name`
/// that is not a token character.
///
/// An empty name passes; emptiness is checked by the collection itself.
pub fn validate_header_name(name: &str) -> Result<(), HeaderError> {
    match name.chars().find(|&ch| !is_token_char(ch)) {
        Some(ch) => Err(HeaderError::invalid_character(ch)),
        None => Ok(()),
    }
}

/// Fails with [`HeaderError::InvalidCharacter`] on the first character of `value`
/// outside visible ASCII, space and tab.
pub fn validate_header_value(value: &str) -> Result<(), HeaderError> {
    validate_value(value, false)
}

/// Like [`validate_header_value`], but lets non-ASCII characters through.
pub fn validate_header_value_non_ascii(value: &str) -> Result<(), HeaderError> {
    validate_value(value, true)
}

/// Validates every value of a multi-value field, stopping at the first failure.
pub fn validate_header_values(values: &FieldValues) -> Result<(), HeaderError> {
    values.iter().try_for_each(validate_header_value)
}

fn validate_value(value: &str, allow_non_ascii: bool) -> Result<(), HeaderError> {
    match value.chars().find(|&ch| !is_field_value_char(ch, allow_non_ascii)) {
        Some(ch) => Err(HeaderError::invalid_character(ch)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_token_names() {
        assert!(validate_header_name("Content-Type").is_ok());
        assert!(validate_header_name("x-custom_header.v2").is_ok());
        assert!(validate_header_name("!#$%&'*+-.^_`|~").is_ok());
        assert!(validate_header_name("").is_ok());
    }

    #[test]
    fn rejects_name_with_space() {
        assert_eq!(validate_header_name("Content Type"), Err(HeaderError::invalid_character(' ')));
    }

    #[test]
    fn rejects_name_separators() {
        for ch in ['(', ')', ',', '/', ':', ';', '<', '=', '>', '?', '@', '[', '\\', ']', '{', '}', '"'] {
            let name = format!("x{ch}y");
            assert_eq!(validate_header_name(&name), Err(HeaderError::invalid_character(ch)), "{name}");
        }
    }

    #[test]
    fn rejects_non_ascii_name() {
        assert_eq!(validate_header_name("héader"), Err(HeaderError::invalid_character('é')));
    }

    #[test]
    fn accepts_visible_values_with_tab() {
        assert!(validate_header_value("text/html; charset=utf-8").is_ok());
        assert!(validate_header_value("a\tb").is_ok());
        assert!(validate_header_value("").is_ok());
        assert!(validate_header_value("\"#Not_A Brand\";v=\"99\"").is_ok());
    }

    #[test]
    fn rejects_control_bytes_in_value() {
        assert_eq!(validate_header_value("a\rb"), Err(HeaderError::invalid_character('\r')));
        assert_eq!(validate_header_value("a\nb"), Err(HeaderError::invalid_character('\n')));
        assert_eq!(validate_header_value("a\0b"), Err(HeaderError::invalid_character('\0')));
        assert_eq!(validate_header_value("a\u{7f}b"), Err(HeaderError::invalid_character('\u{7f}')));
    }

    #[test]
    fn non_ascii_values_need_opt_in() {
        assert_eq!(validate_header_value("café"), Err(HeaderError::invalid_character('é')));
        assert!(validate_header_value_non_ascii("café").is_ok());
        // control bytes stay rejected either way
        assert!(validate_header_value_non_ascii("caf\u{1}").is_err());
    }

    #[test]
    fn validates_every_value_of_field() {
        assert!(validate_header_values(&FieldValues::from(["a", "b"])).is_ok());
        assert_eq!(
            validate_header_values(&FieldValues::from(["a", "b\u{8}"])),
            Err(HeaderError::invalid_character('\u{8}'))
        );
    }
}
