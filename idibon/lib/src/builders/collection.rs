use serde::Serialize;
use serde_json::Value;

use super::OneOrMany;
use crate::error::{BuilderError, require_text};

/// Builder for collection creation and update payloads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    name: Option<String>,
    description: Option<String>,
    is_active: Option<bool>,
    tasks: Option<Vec<Value>>,
}

/// Wire form of a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionOptions {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Value>>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a collection with its required name and description.
    pub fn for_name(name: &str, description: &str) -> Result<Self, BuilderError> {
        Ok(Self::new().with_name(name)?.with_description(description))
    }

    pub fn with_name(mut self, name: &str) -> Result<Self, BuilderError> {
        require_text("name", name)?;
        self.name = Some(name.to_string());
        Ok(self)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn set_as_active(mut self) -> Self {
        self.is_active = Some(true);
        self
    }

    pub fn set_as_not_active(mut self) -> Self {
        self.is_active = Some(false);
        self
    }

    /// Attaches one task payload or a list of them.
    ///
    /// Tasks are usually produced by [`Task::to_options`](super::Task::to_options)
    /// and converted with `serde_json::to_value`.
    pub fn with_tasks(mut self, tasks: impl Into<OneOrMany<Value>>) -> Self {
        self.tasks = Some(tasks.into().into_vec());
        self
    }

    pub fn to_options(&self) -> Result<CollectionOptions, BuilderError> {
        let (Some(name), Some(description)) = (&self.name, &self.description) else {
            return Err(BuilderError::MissingField {
                builder: "Collection",
                fields: &["name", "description"],
            });
        };

        Ok(CollectionOptions {
            name: name.clone(),
            description: description.clone(),
            is_active: self.is_active,
            tasks: self.tasks.clone(),
        })
    }
}
