//! Label rename with configuration propagation.
//!
//! Task configuration (sub-tasks, tuning dictionaries, confidence thresholds)
//! is keyed by label *name*, so renaming a label takes two writes: the rename
//! itself, then a configuration update that moves the old name's entries to
//! the new name.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value, json};
use tracing::{debug, error};

use super::IdibonClient;
use crate::error::{ApiError, LabelError, ResponseError, require_text};
use crate::method::RestMethod;
use crate::models::{TaskConfig, TaskLabel, TaskRecord};
use crate::path::encode_path;

/// Outcome of [`rename_label`](IdibonClient::rename_label).
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRename {
    pub uuid: String,
    pub old_name: String,
    pub new_name: String,
    /// The service's response to the rename request.
    pub response: Value,
}

/// Name and uuid lookups over one task's labels.
#[derive(Debug)]
struct LabelIndex<'a> {
    by_uuid: HashMap<&'a str, &'a str>,
    by_name: HashMap<&'a str, &'a str>,
}

impl<'a> LabelIndex<'a> {
    fn build(labels: &'a [TaskLabel]) -> Result<Self, LabelError> {
        let unique: HashSet<&str> = labels.iter().map(|l| l.name.as_str()).collect();
        if unique.len() != labels.len() {
            return Err(LabelError::DuplicateNames {
                unique: unique.len(),
                total: labels.len(),
            });
        }

        Ok(Self {
            by_uuid: labels.iter().map(|l| (l.uuid.as_str(), l.name.as_str())).collect(),
            by_name: labels.iter().map(|l| (l.name.as_str(), l.uuid.as_str())).collect(),
        })
    }

    /// Resolves `label` as a uuid first, then as a name. Returns
    /// `(uuid, name)`.
    fn resolve(&self, label: &str) -> Result<(String, String), LabelError> {
        if let Some(name) = self.by_uuid.get(label) {
            return Ok((label.to_string(), (*name).to_string()));
        }
        if let Some(uuid) = self.by_name.get(label) {
            return Ok(((*uuid).to_string(), label.to_string()));
        }
        Err(LabelError::NotFound {
            label: label.to_string(),
        })
    }
}

/// Copies `map`, moving the `old` entry (if any) to `new`.
fn rename_key(map: &Map<String, Value>, old: &str, new: &str) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| {
            let key = if key == old { new } else { key.as_str() };
            (key.to_string(), value.clone())
        })
        .collect()
}

/// Builds the partial task configuration for a rename, or `None` when the
/// task has no label-keyed configuration.
fn config_update(config: &TaskConfig, old: &str, new: &str) -> Option<Value> {
    let mut update = Map::new();

    if let Some(sub_tasks) = &config.sub_tasks {
        update.insert("sub_tasks".into(), Value::Object(rename_key(sub_tasks, old, new)));
    }
    if let Some(tuning) = &config.tuning {
        update.insert("tuning".into(), Value::Object(rename_key(tuning, old, new)));
    }
    if let Some(labels) = config
        .confidence_thresholds
        .as_ref()
        .and_then(|thresholds| thresholds.labels.as_ref())
    {
        update.insert(
            "confidence_thresholds".into(),
            json!({ "labels": rename_key(labels, old, new) }),
        );
    }

    (!update.is_empty()).then_some(Value::Object(update))
}

fn task_record(response: &Value) -> Result<TaskRecord, ApiError> {
    let task = response
        .get("task")
        .ok_or(ResponseError::MissingField { field: "task" })?;
    serde_json::from_value(task.clone()).map_err(|source| {
        ResponseError::MalformedResponse {
            body: response.to_string(),
            source,
        }
        .into()
    })
}

/// The error report carried by an otherwise successful response.
fn reported_error(response: &Value) -> Option<String> {
    let report = response.get("error").or_else(|| response.get("errors"))?;
    match report {
        Value::Null | Value::Bool(false) => None,
        Value::Array(items) if items.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// The configuration echoed by the rename response, if it carries one.
fn echoed_config(response: &Value) -> Option<TaskConfig> {
    let config = response.get("task")?.get("config")?;
    if !config.is_object() {
        return None;
    }
    serde_json::from_value(config.clone()).ok()
}

impl IdibonClient {
    /// Renames a task label and moves its configuration entries to the new
    /// name.
    ///
    /// `old_label` may be the label's uuid or its current name; uuids are
    /// matched first.
    ///
    /// ## Errors
    ///
    /// - [`LabelError::DuplicateNames`] if the task's label names are not
    ///   unique, and [`LabelError::NotFound`] if `old_label` matches nothing.
    ///   No write is issued in either case.
    /// - [`LabelError::RenameRejected`] if the rename response reports an
    ///   `error` or `errors` member. No configuration update is issued, nor
    ///   for a non-2xx rename response.
    /// - [`LabelError::PropagationFailed`] if the rename succeeded but the
    ///   configuration update did not. The rename is not rolled back.
    pub async fn rename_label(
        &self,
        collection: &str,
        task: &str,
        old_label: &str,
        new_name: &str,
    ) -> Result<LabelRename, ApiError> {
        require_text("new_name", new_name)?;

        let fetched = task_record(&self.fetch_task(collection, task).await?)?;
        let index = LabelIndex::build(&fetched.labels).inspect_err(|err| {
            error!(collection, task, error = %err, "cannot resolve label names");
        })?;
        let (uuid, old_name) = index.resolve(old_label)?;
        debug!(collection, task, %uuid, %old_name, new_name, "resolved label");

        let path = encode_path("/%s/%s", &[collection, task])?;
        let body = json!({ "labels": [{ "uuid": uuid, "name": new_name }] });
        let response = self.call_api(RestMethod::Post, &path, Some(&body)).await?;
        if let Some(message) = reported_error(&response) {
            error!(collection, task, %uuid, %message, "label rename rejected");
            return Err(LabelError::RenameRejected { uuid, message }.into());
        }

        let config = echoed_config(&response).unwrap_or(fetched.config);
        if let Some(update) = config_update(&config, &old_name, new_name) {
            if let Err(err) = self.update_task_config(collection, task, update).await {
                error!(collection, task, %uuid, error = %err, "label renamed but configuration update failed");
                return Err(LabelError::PropagationFailed {
                    uuid,
                    new_name: new_name.to_string(),
                    source: Box::new(err),
                }
                .into());
            }
        }

        Ok(LabelRename {
            uuid,
            old_name,
            new_name: new_name.to_string(),
            response,
        })
    }
}
