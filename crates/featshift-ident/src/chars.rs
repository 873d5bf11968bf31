//! Character classes for dotted identifiers
//!
//! Package and class names embedded in text follow Java identifier rules:
//! letters, digits, `_` and `$`. Any Unicode letter or digit counts.

/// Check if `c` can appear inside an identifier segment
#[inline]
#[must_use]
pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Check if `c` begins a lower-case package segment
///
/// Class names start upper-case, so a segment starting with a lower-case
/// letter or digit after a `.` continues the package name.
#[inline]
#[must_use]
pub fn is_package_continuation(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}
