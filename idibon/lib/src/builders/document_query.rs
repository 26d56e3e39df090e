use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::error::{BuilderError, require_text};

/// Timestamp that documents are sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    AnnotatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Builder for the filters and paging of
/// [`fetch_documents`](crate::IdibonClient::fetch_documents).
///
/// ## Examples
///
/// ```rust
/// use idibon::builders::{DocumentQuery, SortField};
///
/// let query = DocumentQuery::new()
///     .with_count(200)?
///     .sort_by_update()
///     .in_descending_order()
///     .with_task("genre")?
///     .with_label("pop")?
///     .to_options()?;
/// assert_eq!(query.sort, Some(SortField::UpdatedAt));
/// # Ok::<(), idibon::BuilderError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentQuery {
    start: Option<u64>,
    count: Option<u64>,
    stream: Option<bool>,
    full: Option<bool>,
    sort: Option<SortField>,
    order: Option<SortOrder>,
    before: Option<DateTime<Utc>>,
    after: Option<DateTime<Utc>>,
    task: Option<String>,
    label: Option<String>,
    content: Option<String>,
}

/// Wire form of a document query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentQueryOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl DocumentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the first document returned.
    pub fn with_start(mut self, start: u64) -> Self {
        self.start = Some(start);
        self
    }

    /// Documents per page. The service caps pages at 1000.
    pub fn with_count(mut self, count: u64) -> Result<Self, BuilderError> {
        if count == 0 {
            return Err(BuilderError::invalid("count", "page size must be at least 1"));
        }
        self.count = Some(count);
        Ok(self)
    }

    /// Requests only document names and creation dates.
    pub fn in_stream_mode(mut self) -> Self {
        self.stream = Some(true);
        self.full = Some(true);
        self
    }

    pub fn sort_by_creation(mut self) -> Self {
        self.sort = Some(SortField::CreatedAt);
        self
    }

    pub fn sort_by_update(mut self) -> Self {
        self.sort = Some(SortField::UpdatedAt);
        self
    }

    pub fn sort_by_annotation(mut self) -> Self {
        self.sort = Some(SortField::AnnotatedAt);
        self
    }

    pub fn in_ascending_order(mut self) -> Self {
        self.order = Some(SortOrder::Asc);
        self
    }

    pub fn in_descending_order(mut self) -> Self {
        self.order = Some(SortOrder::Desc);
        self
    }

    pub fn with_task(mut self, task: &str) -> Result<Self, BuilderError> {
        require_text("task", task)?;
        self.task = Some(task.to_string());
        Ok(self)
    }

    /// Filters on a label. A task must also be set before finalizing.
    pub fn with_label(mut self, label: &str) -> Result<Self, BuilderError> {
        require_text("label", label)?;
        self.label = Some(label.to_string());
        Ok(self)
    }

    pub fn updated_after(mut self, after: DateTime<Utc>) -> Self {
        self.after = Some(after);
        self
    }

    pub fn updated_before(mut self, before: DateTime<Utc>) -> Self {
        self.before = Some(before);
        self
    }

    /// Keeps only documents whose content contains this snippet.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// ## Errors
    ///
    /// - [`BuilderError::LabelWithoutTask`] if a label is set without a task
    /// - [`BuilderError::InvertedTimeRange`] if `updated_after` is not earlier
    ///   than `updated_before`
    pub fn to_options(&self) -> Result<DocumentQueryOptions, BuilderError> {
        if self.label.is_some() && self.task.is_none() {
            return Err(BuilderError::LabelWithoutTask);
        }

        if let (Some(after), Some(before)) = (self.after, self.before) {
            if after >= before {
                return Err(BuilderError::InvertedTimeRange);
            }
        }

        Ok(DocumentQueryOptions {
            start: self.start,
            count: self.count,
            stream: self.stream,
            full: self.full,
            sort: self.sort,
            order: self.order,
            before: self.before,
            after: self.after,
            task: self.task.clone(),
            label: self.label.clone(),
            content: self.content.clone(),
        })
    }
}
