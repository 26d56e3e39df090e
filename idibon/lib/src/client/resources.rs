//! Collection, document, task, label and annotation operations.
//!
//! Each operation is a single [`call_api`](IdibonClient::call_api) request with
//! the body wrapped in the envelope key the service expects.

use serde::Serialize;
use serde_json::{Value, json};

use super::IdibonClient;
use crate::builders::{
    AnnotationOptions, ClassificationOptions, CollectionOptions, ConfidenceThresholdOptions,
    DocumentOptions, LabelOptions, SubtaskOptions, TaskOptions, TuningDictionaryOptions,
};
use crate::error::{ApiError, ClientError};
use crate::method::RestMethod;
use crate::path::encode_path;

impl IdibonClient {
    // Collections

    /// Lists the collections visible to the API key.
    pub async fn list_collections(&self) -> Result<Value, ApiError> {
        self.get("/").await
    }

    pub async fn create_collection(&self, options: &CollectionOptions) -> Result<Value, ApiError> {
        let path = encode_path("/%s", &[options.name.as_str()])?;
        self.call_api(RestMethod::Put, &path, Some(&json!({ "collection": options })))
            .await
    }

    /// Replaces a collection's description.
    pub async fn update_collection(
        &self,
        collection: &str,
        description: &str,
    ) -> Result<Value, ApiError> {
        let path = encode_path("/%s", &[collection])?;
        let body = json!({ "collection": { "description": description } });
        self.call_api(RestMethod::Post, &path, Some(&body)).await
    }

    pub async fn delete_collection(&self, collection: &str) -> Result<Value, ApiError> {
        let path = encode_path("/%s", &[collection])?;
        self.call_api(RestMethod::Delete, &path, Some(&json!({ "collection": true })))
            .await
    }

    // Documents

    pub async fn fetch_document(&self, collection: &str, document: &str) -> Result<Value, ApiError> {
        let path = encode_path("/%s/%s", &[collection, document])?;
        self.get(&path).await
    }

    pub async fn create_document(
        &self,
        collection: &str,
        document: &str,
        options: &DocumentOptions,
    ) -> Result<Value, ApiError> {
        let path = encode_path("/%s/%s", &[collection, document])?;
        self.call_api(RestMethod::Put, &path, Some(&json!({ "document": options })))
            .await
    }

    /// Uploads several documents in one request.
    ///
    /// Documents are usually [`DocumentOptions`], but any serializable value
    /// is accepted, which lets callers forward pre-built JSON.
    pub async fn create_documents<T>(&self, collection: &str, documents: &[T]) -> Result<Value, ApiError>
    where
        T: Serialize,
    {
        let path = encode_path("/%s/*", &[collection])?;
        let body = envelope("documents", documents)?;
        self.call_api(RestMethod::Post, &path, Some(&body)).await
    }

    pub async fn delete_document(&self, collection: &str, document: &str) -> Result<Value, ApiError> {
        let path = encode_path("/%s/%s", &[collection, document])?;
        self.call_api::<Value>(RestMethod::Delete, &path, None).await
    }

    // Tasks

    /// Creates a task named by `options.name`.
    pub async fn create_task(&self, collection: &str, options: &TaskOptions) -> Result<Value, ApiError> {
        let path = encode_path("/%s/%s", &[collection, options.name.as_str()])?;
        self.call_api(RestMethod::Put, &path, Some(&json!({ "task": options })))
            .await
    }

    pub async fn fetch_task(&self, collection: &str, task: &str) -> Result<Value, ApiError> {
        let path = encode_path("/%s/%s", &[collection, task])?;
        self.get(&path).await
    }

    /// Updates a task with a partial task object.
    pub async fn update_task<T>(&self, collection: &str, task: &str, options: &T) -> Result<Value, ApiError>
    where
        T: Serialize + ?Sized,
    {
        let path = encode_path("/%s/%s", &[collection, task])?;
        let body = envelope("task", options)?;
        self.call_api(RestMethod::Post, &path, Some(&body)).await
    }

    pub async fn delete_task(&self, collection: &str, task: &str) -> Result<Value, ApiError> {
        let path = encode_path("/%s/%s", &[collection, task])?;
        self.call_api(RestMethod::Delete, &path, Some(&json!({ "task": true })))
            .await
    }

    // Labels

    pub async fn add_task_labels(
        &self,
        collection: &str,
        task: &str,
        labels: &[LabelOptions],
    ) -> Result<Value, ApiError> {
        let path = encode_path("/%s/%s", &[collection, task])?;
        self.call_api(RestMethod::Post, &path, Some(&json!({ "labels": labels })))
            .await
    }

    pub async fn remove_task_label(
        &self,
        collection: &str,
        task: &str,
        label: &str,
    ) -> Result<Value, ApiError> {
        let path = encode_path("/%s/%s", &[collection, task])?;
        self.call_api(RestMethod::Delete, &path, Some(&json!({ "label": label })))
            .await
    }

    // Task configuration

    pub async fn set_tuning_dictionary(
        &self,
        collection: &str,
        task: &str,
        dictionary: &TuningDictionaryOptions,
    ) -> Result<Value, ApiError> {
        self.update_task_config(collection, task, json!({ "tuning": dictionary }))
            .await
    }

    pub async fn set_confidence_thresholds(
        &self,
        collection: &str,
        task: &str,
        thresholds: &ConfidenceThresholdOptions,
    ) -> Result<Value, ApiError> {
        let config = json!({ "confidence_thresholds": { "labels": thresholds } });
        self.update_task_config(collection, task, config).await
    }

    pub async fn create_subtasks(
        &self,
        collection: &str,
        task: &str,
        subtasks: &SubtaskOptions,
    ) -> Result<Value, ApiError> {
        self.update_task_config(collection, task, json!({ "sub_tasks": subtasks }))
            .await
    }

    pub(super) async fn update_task_config(
        &self,
        collection: &str,
        task: &str,
        config: Value,
    ) -> Result<Value, ApiError> {
        self.update_task(collection, task, &json!({ "config": config }))
            .await
    }

    // Annotations

    pub async fn create_annotations(
        &self,
        collection: &str,
        document: &str,
        annotations: &[AnnotationOptions],
    ) -> Result<Value, ApiError> {
        let path = encode_path("/%s/%s", &[collection, document])?;
        self.call_api(RestMethod::Post, &path, Some(&json!({ "annotations": annotations })))
            .await
    }

    pub async fn delete_annotation(
        &self,
        collection: &str,
        document: &str,
        annotation_uuid: &str,
    ) -> Result<Value, ApiError> {
        let path = encode_path("/%s/%s", &[collection, document])?;
        self.call_api(RestMethod::Delete, &path, Some(&json!({ "annotation": annotation_uuid })))
            .await
    }

    /// Requests a prediction for a stored document or for new content.
    ///
    /// The options are sent unwrapped in the body of a GET.
    pub async fn create_classification(
        &self,
        collection: &str,
        task: &str,
        options: &ClassificationOptions,
    ) -> Result<Value, ApiError> {
        let path = encode_path("/%s/%s", &[collection, task])?;
        self.call_api(RestMethod::Get, &path, Some(options)).await
    }
}

/// Wraps a caller-supplied value as `{key: value}`.
fn envelope<T>(key: &str, value: &T) -> Result<Value, ApiError>
where
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(value).map_err(ClientError::Serialize)?;
    let mut body = serde_json::Map::new();
    body.insert(key.to_string(), value);
    Ok(Value::Object(body))
}
