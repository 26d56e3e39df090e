//! Typed views of the service responses the client inspects.
//!
//! Most responses are returned to the caller as [`serde_json::Value`]. The
//! label rename flow needs to read a task's labels and configuration, so those
//! parts are deserialized here.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The members of a task the client reads, taken from the `task` member of
/// fetch and rename responses. Unknown members are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<TaskLabel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: TaskConfig,
}

/// The service sends `null` for members that were never set.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A label as listed on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLabel {
    pub uuid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Task configuration fragments keyed by label name.
///
/// Each fragment is kept as a raw JSON object; only its keys are rewritten
/// during a label rename.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_tasks: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuning: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_thresholds: Option<ConfidenceThresholds>,
}

/// `config.confidence_thresholds`. The service nests the per-label map under
/// `labels`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfidenceThresholds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_task_with_unknown_members() {
        let body = json!({
            "task": {
                "uuid": "9b0c",
                "name": "genre",
                "scope": "document",
                "labels": [
                    {"uuid": "l1", "name": "pop"},
                    {"uuid": "l2", "name": "country", "description": "twang"}
                ],
                "config": {
                    "sub_tasks": {"pop": ["dance"]},
                    "confidence_thresholds": {"labels": {"pop": {"suggested": 0.4}}}
                }
            }
        });

        let task: TaskRecord = serde_json::from_value(body["task"].clone()).unwrap();
        assert_eq!(task.name, "genre");
        assert_eq!(task.labels.len(), 2);
        assert_eq!(task.labels[1].description.as_deref(), Some("twang"));
        assert!(task.config.tuning.is_none());
        assert!(task.config.sub_tasks.unwrap().contains_key("pop"));
    }

    #[test]
    fn test_empty_config_defaults() {
        let task: TaskRecord =
            serde_json::from_value(json!({"name": "t", "config": {}})).unwrap();
        assert_eq!(task.config, TaskConfig::default());
        assert!(task.labels.is_empty());
    }

    #[test]
    fn test_null_members_default() {
        let task: TaskRecord =
            serde_json::from_value(json!({"name": "t", "config": null, "labels": null})).unwrap();
        assert_eq!(task.config, TaskConfig::default());
        assert!(task.labels.is_empty());
    }
}
