//! Tuning dictionaries: per-label phrases with weights.
//!
//! A phrase is either literal text or a [`PhrasePattern`]. Patterns travel as
//! plain strings with the flags folded into an inline `(?im)` prefix, the form
//! the service's regex engine reads.

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;

use crate::error::{BuilderError, require_text, require_unit_interval};

/// Wire form: `{label: {phrase: weight}}`.
pub type TuningDictionaryOptions = BTreeMap<String, BTreeMap<String, f64>>;

/// A regular expression phrase with its flags kept separate from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhrasePattern {
    source: String,
    case_insensitive: bool,
    multiline: bool,
}

impl PhrasePattern {
    /// Validates `source` as a regular expression.
    pub fn new(source: impl Into<String>) -> Result<Self, BuilderError> {
        let source = source.into();
        Regex::new(&source).map_err(|e| BuilderError::InvalidPattern(e.to_string()))?;
        Ok(Self {
            source,
            case_insensitive: false,
            multiline: false,
        })
    }

    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    pub fn multiline(mut self, yes: bool) -> Self {
        self.multiline = yes;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl From<&Regex> for PhrasePattern {
    fn from(regex: &Regex) -> Self {
        Self {
            source: regex.as_str().to_string(),
            case_insensitive: false,
            multiline: false,
        }
    }
}

impl fmt::Display for PhrasePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = String::new();
        if self.case_insensitive {
            flags.push('i');
        }
        if self.multiline {
            flags.push('m');
        }
        if flags.is_empty() {
            f.write_str(&self.source)
        } else {
            write!(f, "(?{flags}){}", self.source)
        }
    }
}

/// A dictionary key: literal text or a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phrase {
    Text(String),
    Pattern(PhrasePattern),
}

impl Phrase {
    /// The string sent to the service.
    pub fn to_wire(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Pattern(pattern) => pattern.to_string(),
        }
    }
}

impl From<&str> for Phrase {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Phrase {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<PhrasePattern> for Phrase {
    fn from(pattern: PhrasePattern) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<&Regex> for Phrase {
    fn from(regex: &Regex) -> Self {
        Self::Pattern(regex.into())
    }
}

/// Accumulates `label -> phrase -> weight` entries.
///
/// ```rust
/// use idibon::builders::{PhrasePattern, TuningDictionary};
///
/// let dict = TuningDictionary::new()
///     .add_dict("country", "banjo", 0.9)?
///     .add_dict("country", PhrasePattern::new("pick(up)? truck")?.case_insensitive(true), 0.7)?
///     .to_options()?;
/// assert_eq!(dict["country"]["(?i)pick(up)? truck"], 0.7);
/// # Ok::<(), idibon::BuilderError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TuningDictionary {
    entries: TuningDictionaryOptions,
}

impl TuningDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a weighted phrase to a label. A repeated phrase replaces the
    /// earlier weight; other phrases of the label are kept.
    pub fn add_dict(
        mut self,
        label: &str,
        phrase: impl Into<Phrase>,
        weight: f64,
    ) -> Result<Self, BuilderError> {
        require_text("label", label)?;
        require_unit_interval("weight", weight)?;
        self.entries
            .entry(label.to_string())
            .or_default()
            .insert(phrase.into().to_wire(), weight);
        Ok(self)
    }

    pub fn to_options(&self) -> Result<TuningDictionaryOptions, BuilderError> {
        if self.entries.is_empty() {
            return Err(BuilderError::EmptyCollection {
                builder: "TuningDictionary",
            });
        }
        Ok(self.entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_phrase() {
        let options = TuningDictionary::new()
            .add_dict("pop", "catchy", 0.4)
            .unwrap()
            .to_options()
            .unwrap();
        assert_eq!(serde_json::to_value(&options).unwrap(), json!({"pop": {"catchy": 0.4}}));
    }

    #[test]
    fn test_pattern_flags_prefix() {
        let both = PhrasePattern::new("a.b").unwrap().case_insensitive(true).multiline(true);
        assert_eq!(both.to_string(), "(?im)a.b");

        let multiline = PhrasePattern::new("a.b").unwrap().multiline(true);
        assert_eq!(multiline.to_string(), "(?m)a.b");

        let plain = PhrasePattern::new("a.b").unwrap();
        assert_eq!(plain.to_string(), "a.b");
    }

    #[test]
    fn test_compiled_regex_phrase() {
        let regex = Regex::new(r"\bfiddle\b").unwrap();
        let options = TuningDictionary::new()
            .add_dict("country", &regex, 1.0)
            .unwrap()
            .to_options()
            .unwrap();
        assert_eq!(options["country"][r"\bfiddle\b"], 1.0);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        assert!(matches!(PhrasePattern::new("(unclosed"), Err(BuilderError::InvalidPattern(_))));
    }

    #[test]
    fn test_phrases_accumulate_per_label() {
        let options = TuningDictionary::new()
            .add_dict("pop", "catchy", 0.4)
            .unwrap()
            .add_dict("pop", "chorus", 0.6)
            .unwrap()
            .add_dict("pop", "catchy", 0.5)
            .unwrap()
            .to_options()
            .unwrap();
        assert_eq!(options["pop"].len(), 2);
        assert_eq!(options["pop"]["catchy"], 0.5);
    }

    #[test]
    fn test_weight_range() {
        let err = TuningDictionary::new().add_dict("pop", "x", 1.4).unwrap_err();
        assert_eq!(err.field(), Some("weight"));
        assert!(TuningDictionary::new().add_dict("pop", "x", f64::NAN).is_err());
    }

    #[test]
    fn test_empty_builder_fails() {
        assert_eq!(
            TuningDictionary::new().to_options().unwrap_err(),
            BuilderError::EmptyCollection { builder: "TuningDictionary" }
        );
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let builder = TuningDictionary::new().add_dict("pop", "catchy", 0.4).unwrap();
        assert_eq!(builder.to_options().unwrap(), builder.to_options().unwrap());
    }
}
