//! Request path formatting.
//!
//! Collection, task and document names are caller-supplied and may contain
//! `/`, spaces or other reserved characters. Every dynamic segment is
//! percent-encoded before it is placed into the path, using the same
//! unreserved set as JavaScript's `encodeURIComponent`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::PathError;

/// Characters left untouched: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const PLACEHOLDER: &str = "%s";

/// Percent-encodes a single path segment.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT_ENCODE_SET).to_string()
}

/// Formats `template`, replacing each `%s` in order with the matching
/// percent-encoded segment.
///
/// ## Errors
///
/// Returns [`PathError::PlaceholderMismatch`] when the number of placeholders
/// and segments differ.
///
/// ## Examples
///
/// ```
/// use idibon::encode_path;
///
/// let path = encode_path("%s/%s", &["unclear/name", "requires/encoding"]).unwrap();
/// assert_eq!(path, "unclear%2Fname/requires%2Fencoding");
/// ```
pub fn encode_path(template: &str, segments: &[&str]) -> Result<String, PathError> {
    let placeholders = template.matches(PLACEHOLDER).count();
    if placeholders != segments.len() {
        return Err(PathError::PlaceholderMismatch {
            placeholders,
            segments: segments.len(),
        });
    }

    let mut parts = template.split(PLACEHOLDER);
    let mut path = String::with_capacity(template.len() + segments.len() * 16);
    path.push_str(parts.next().unwrap_or_default());
    for (segment, literal) in segments.iter().zip(parts) {
        path.push_str(&encode_segment(segment));
        path.push_str(literal);
    }
    Ok(path)
}
