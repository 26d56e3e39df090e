use serde::Serialize;

use crate::error::{BuilderError, require_text};

/// A label to add to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelOptions {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Accumulates labels for [`add_task_labels`](crate::IdibonClient::add_task_labels).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Label {
    labels: Vec<LabelOptions>,
}

impl Label {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_label(self, name: &str) -> Result<Self, BuilderError> {
        self.push(name, None)
    }

    pub fn add_described_label(
        self,
        name: &str,
        description: impl Into<String>,
    ) -> Result<Self, BuilderError> {
        self.push(name, Some(description.into()))
    }

    fn push(mut self, name: &str, description: Option<String>) -> Result<Self, BuilderError> {
        require_text("name", name)?;
        self.labels.push(LabelOptions {
            name: name.to_string(),
            // an empty description is the same as none
            description: description.filter(|d| !d.is_empty()),
        });
        Ok(self)
    }

    pub fn to_options(&self) -> Result<Vec<LabelOptions>, BuilderError> {
        if self.labels.is_empty() {
            return Err(BuilderError::EmptyCollection { builder: "Label" });
        }
        Ok(self.labels.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_labels_in_insertion_order() {
        let labels = Label::new()
            .add_described_label("pop", "Popular music")
            .unwrap()
            .add_label("country")
            .unwrap()
            .to_options()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&labels).unwrap(),
            json!([
                {"name": "pop", "description": "Popular music"},
                {"name": "country"}
            ])
        );
    }

    #[test]
    fn test_empty_description_omitted() {
        let labels = Label::new().add_described_label("pop", "").unwrap().to_options().unwrap();
        assert_eq!(labels[0].description, None);
    }

    #[test]
    fn test_empty_builder_fails() {
        assert_eq!(
            Label::new().to_options().unwrap_err(),
            BuilderError::EmptyCollection { builder: "Label" }
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(Label::new().add_label("").unwrap_err().field(), Some("name"));
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let builder = Label::new().add_described_label("pop", "Pop music").unwrap();
        assert_eq!(builder.to_options().unwrap(), builder.to_options().unwrap());
    }
}
