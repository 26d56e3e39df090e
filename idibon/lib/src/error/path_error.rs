//! Request path formatting errors.

use thiserror::Error;

/// Errors formatting a request path from a template.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// The template's `%s` placeholders and the supplied segments differ in number.
    #[error("path template has {placeholders} placeholder(s) but {segments} segment(s) were given")]
    PlaceholderMismatch {
        /// Number of `%s` placeholders in the template.
        placeholders: usize,
        /// Number of segments supplied.
        segments: usize,
    },
}
