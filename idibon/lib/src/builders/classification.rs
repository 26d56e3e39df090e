use serde::Serialize;

use crate::error::{BuilderError, require_text};

/// Builder for a classification request.
///
/// A classification targets either a stored document or ad-hoc content.
/// Setting one clears the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    target: Option<ClassificationOptions>,
}

/// Wire form of a classification request: `{"document": name}` or
/// `{"content": text}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationOptions {
    Document(String),
    Content(String),
}

impl Classification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies the stored document with this name.
    pub fn with_document(mut self, document: &str) -> Result<Self, BuilderError> {
        require_text("document", document)?;
        self.target = Some(ClassificationOptions::Document(document.to_string()));
        Ok(self)
    }

    /// Classifies unstored text.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.target = Some(ClassificationOptions::Content(content.into()));
        self
    }

    pub fn to_options(&self) -> Result<ClassificationOptions, BuilderError> {
        self.target.clone().ok_or(BuilderError::MissingField {
            builder: "Classification",
            fields: &["document", "content"],
        })
    }
}
