use std::collections::BTreeMap;

use crate::error::{BuilderError, require_text};

/// Wire form: `{label: [subtask, ...]}`.
pub type SubtaskOptions = BTreeMap<String, Vec<String>>;

/// Maps labels to the subtasks that run when the label is assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subtask {
    subtasks: SubtaskOptions,
}

impl Subtask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the subtasks for `label`, replacing any earlier ones.
    ///
    /// ## Errors
    ///
    /// Fails if the label or any subtask name is empty, or if no subtasks are
    /// given.
    pub fn add_subtask<I, S>(mut self, label: &str, subtasks: I) -> Result<Self, BuilderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        require_text("label", label)?;
        let subtasks: Vec<String> = subtasks.into_iter().map(Into::into).collect();
        if subtasks.is_empty() {
            return Err(BuilderError::invalid(
                "subtasks",
                "at least one subtask must be provided",
            ));
        }
        for name in &subtasks {
            require_text("subtasks", name)?;
        }
        self.subtasks.insert(label.to_string(), subtasks);
        Ok(self)
    }

    pub fn to_options(&self) -> Result<SubtaskOptions, BuilderError> {
        if self.subtasks.is_empty() {
            return Err(BuilderError::EmptyCollection { builder: "Subtask" });
        }
        Ok(self.subtasks.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_maps_to_subtasks() {
        let options = Subtask::new()
            .add_subtask("music", ["genre", "mood"])
            .unwrap()
            .to_options()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"music": ["genre", "mood"]})
        );
    }

    #[test]
    fn test_no_subtasks_rejected() {
        let err = Subtask::new().add_subtask("music", Vec::<String>::new()).unwrap_err();
        assert_eq!(err.field(), Some("subtasks"));
    }

    #[test]
    fn test_empty_subtask_name_rejected() {
        assert!(Subtask::new().add_subtask("music", ["genre", ""]).is_err());
    }

    #[test]
    fn test_empty_builder_fails() {
        assert_eq!(
            Subtask::new().to_options().unwrap_err(),
            BuilderError::EmptyCollection { builder: "Subtask" }
        );
    }

    #[test]
    fn test_labels_accumulate() {
        let builder = Subtask::new()
            .add_subtask("music", ["genre"])
            .unwrap()
            .add_subtask("film", ["director", "era"])
            .unwrap();
        let first = builder.to_options().unwrap();
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            json!({"film": ["director", "era"], "music": ["genre"]})
        );
        assert_eq!(builder.to_options().unwrap(), first);
    }
}
