use serde::Serialize;
use serde_json::{Map, Value};
use strum::{Display, EnumString};

use crate::error::{BuilderError, require_text};

/// Whether a task labels whole documents or spans within them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskScope {
    Document,
    Span,
}

/// Builder for a task definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Task {
    name: Option<String>,
    description: Option<String>,
    scope: Option<TaskScope>,
    is_active: Option<bool>,
    is_trainable: Option<bool>,
}

/// Wire form of a task. `config` is always sent as an empty object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskOptions {
    pub name: String,
    pub description: String,
    pub scope: TaskScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_trainable: Option<bool>,
    pub config: Map<String, Value>,
}

impl Task {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a task with its required name, description and scope.
    pub fn for_name(
        name: &str,
        description: impl Into<String>,
        scope: TaskScope,
    ) -> Result<Self, BuilderError> {
        Ok(Self::new()
            .with_name(name)?
            .with_description(description)
            .with_scope(scope))
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

    pub fn with_scope(mut self, scope: TaskScope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Parses and sets the scope, `"document"` or `"span"`.
    pub fn with_scope_str(self, scope: &str) -> Result<Self, BuilderError> {
        let scope = scope
            .parse::<TaskScope>()
            .map_err(|_| BuilderError::invalid("scope", "scope must either be 'span' or 'document'"))?;
        Ok(self.with_scope(scope))
    }

    pub fn is_activated(mut self) -> Self {
        self.is_active = Some(true);
        self
    }

    pub fn is_not_activated(mut self) -> Self {
        self.is_active = Some(false);
        self
    }

    pub fn trainable(mut self) -> Self {
        self.is_trainable = Some(true);
        self
    }

    pub fn not_trainable(mut self) -> Self {
        self.is_trainable = Some(false);
        self
    }

    pub fn to_options(&self) -> Result<TaskOptions, BuilderError> {
        let (Some(name), Some(description), Some(scope)) =
            (&self.name, &self.description, self.scope)
        else {
            return Err(BuilderError::MissingField {
                builder: "Task",
                fields: &["name", "description", "scope"],
            });
        };

        Ok(TaskOptions {
            name: name.clone(),
            description: description.clone(),
            scope,
            is_active: self.is_active,
            is_trainable: self.is_trainable,
            config: Map::new(),
        })
    }
}
