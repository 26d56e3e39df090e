//! Invalid-argument errors raised by option builders.

use thiserror::Error;

/// Errors raised while building a request payload.
///
/// Every variant is synchronous and happens before any network activity.
/// Setters that fail consume the builder, so no partial state survives.
#[derive(Debug, Error, PartialEq)]
pub enum BuilderError {
    /// A setter received a value outside its domain.
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        /// The field that rejected the value.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The finalizer found required fields unset.
    #[error("{builder} must minimally define {}", .fields.join(", "))]
    MissingField {
        /// The builder being finalized.
        builder: &'static str,
        /// The required fields.
        fields: &'static [&'static str],
    },

    /// Only one of offset and length was set on a span annotation.
    #[error("Span annotations must have both offset and length")]
    SpanPairing,

    /// A document query filtered on a label without naming its task.
    #[error("A task must be provided if a label is provided")]
    LabelWithoutTask,

    /// A document query's `updated_after` bound is not earlier than its
    /// `updated_before` bound.
    #[error("The \"after\" time must be earlier than the \"before\" time")]
    InvertedTimeRange,

    /// An accumulating builder was finalized with no entries.
    #[error("{builder} requires at least one entry")]
    EmptyCollection {
        /// The builder being finalized.
        builder: &'static str,
    },

    /// A tuning dictionary phrase pattern failed to compile.
    #[error("Invalid phrase pattern: {0}")]
    InvalidPattern(String),
}

impl BuilderError {
    /// Creates an invalid field error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the offending field name, if the error names one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidField { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Rejects empty or whitespace-only strings.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), BuilderError> {
    if value.trim().is_empty() {
        return Err(BuilderError::invalid(field, "must be a non-empty string"));
    }
    Ok(())
}

/// Rejects values outside `0.0..=1.0`, including NaN and infinities.
pub(crate) fn require_unit_interval(field: &'static str, value: f64) -> Result<(), BuilderError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(BuilderError::invalid(
            field,
            format!("{value} is not a number between 0 and 1"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = BuilderError::MissingField {
            builder: "Task",
            fields: &["name", "description", "scope"],
        };
        assert_eq!(
            err.to_string(),
            "Task must minimally define name, description, scope"
        );
    }

    #[test]
    fn test_invalid_field_names_field() {
        let err = BuilderError::invalid("confidence", "too large");
        assert_eq!(err.field(), Some("confidence"));
        assert_eq!(err.to_string(), "Invalid confidence: too large");
    }

    #[test]
    fn test_unit_interval() {
        assert!(require_unit_interval("weight", 0.0).is_ok());
        assert!(require_unit_interval("weight", 1.0).is_ok());
        assert!(require_unit_interval("weight", 1.4).is_err());
        assert!(require_unit_interval("weight", -2.0).is_err());
        assert!(require_unit_interval("weight", f64::NAN).is_err());
    }

    #[test]
    fn test_require_text() {
        assert!(require_text("label", "pop").is_ok());
        assert!(require_text("label", "").is_err());
        assert!(require_text("label", "   ").is_err());
    }
}
