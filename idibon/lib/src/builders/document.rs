use serde::Serialize;
use serde_json::{Map, Value};

use super::OneOrMany;
use crate::error::BuilderError;

/// Builder for a document payload.
///
/// Only `content` is required. A document created without a name is named by
/// the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    name: Option<String>,
    content: Option<String>,
    metadata: Option<Map<String, Value>>,
    annotations: Option<Vec<Value>>,
    title: Option<String>,
}

/// Wire form of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentOptions {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<Value>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a document with its required content.
    pub fn for_content(content: impl Into<String>) -> Self {
        Self::new().with_content(content)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Attaches one annotation or a list of them, typically produced by
    /// [`Annotation::to_options`](super::Annotation::to_options).
    pub fn with_annotations(mut self, annotations: impl Into<OneOrMany<Value>>) -> Self {
        self.annotations = Some(annotations.into().into_vec());
        self
    }

    pub fn to_options(&self) -> Result<DocumentOptions, BuilderError> {
        let Some(content) = &self.content else {
            return Err(BuilderError::MissingField {
                builder: "Document",
                fields: &["content"],
            });
        };

        Ok(DocumentOptions {
            content: content.clone(),
            name: self.name.clone(),
            title: self.title.clone(),
            metadata: self.metadata.clone(),
            annotations: self.annotations.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_requires_content() {
        let err = Document::new().with_name("doc-1").to_options().unwrap_err();
        assert_eq!(err.to_string(), "Document must minimally define content");
    }

    #[test]
    fn test_unset_fields_omitted() {
        let options = Document::for_content("hello world").to_options().unwrap();
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"content": "hello world"})
        );
    }

    #[test]
    fn test_full_document() {
        let mut metadata = Map::new();
        metadata.insert("source".into(), json!("twitter"));
        let options = Document::for_content("hello world")
            .with_name("doc-1")
            .with_title("Greeting")
            .with_metadata(metadata)
            .with_annotations(OneOrMany::One(json!({"task": "genre", "label": "pop"})))
            .to_options()
            .unwrap();
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["name"], json!("doc-1"));
        assert_eq!(value["metadata"]["source"], json!("twitter"));
        assert_eq!(value["annotations"], json!([{"task": "genre", "label": "pop"}]));
    }

    #[test]
    fn test_empty_content_is_kept() {
        let options = Document::for_content("").to_options().unwrap();
        assert_eq!(options.content, "");
    }
}
