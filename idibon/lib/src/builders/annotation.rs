//! Annotation payloads for `create_annotations`.

use serde::Serialize;
use strum::{Display, EnumString};

use crate::error::{BuilderError, require_text, require_unit_interval};

/// Who or what assigned an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Provenance {
    /// Assigned by an expert human.
    #[serde(rename = "Human")]
    Human,
    /// Assigned by one or more crowd-source workers.
    #[serde(rename = "prediction")]
    Crowdsourced,
    /// Bootstrapped from a dictionary match or a similar method.
    #[serde(rename = "bootstrapped")]
    Bootstrapped,
}

/// Review status of an annotation.
///
/// The status decides whether the annotation is used for training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AnnotationStatus {
    Final,
    #[strum(serialize = "Gold", serialize = "gold")]
    Gold,
    Reviewed,
    Assigned,
}

impl AnnotationStatus {
    /// `final` and `gold` annotations are trainable; `reviewed` and `assigned`
    /// ones are not.
    pub fn is_trainable(self) -> bool {
        matches!(self, Self::Final | Self::Gold)
    }
}

/// Builder for a single annotation.
///
/// An annotation must name its task and label. Span annotations additionally
/// carry both an offset and a length.
///
/// ## Examples
///
/// ```rust
/// use idibon::builders::Annotation;
///
/// let options = Annotation::for_label("genre", "country")?
///     .bootstrapped()
///     .with_confidence(0.8)?
///     .to_options()?;
/// assert_eq!(options.len(), 1);
/// assert_eq!(options[0].label, "country");
/// # Ok::<(), idibon::BuilderError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotation {
    provenance: Option<Provenance>,
    confidence: Option<f64>,
    reason: Option<String>,
    task: Option<String>,
    label: Option<String>,
    is_negated: Option<bool>,
    status: Option<AnnotationStatus>,
    length: Option<u64>,
    text: Option<String>,
    offset: Option<u64>,
    is_active: Option<bool>,
}

/// Wire form of an annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationOptions {
    pub task: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_negated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AnnotationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_trainable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Annotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an annotation with its required task and label.
    pub fn for_label(task: &str, label: &str) -> Result<Self, BuilderError> {
        Self::new().with_task(task)?.with_label(label)
    }

    pub fn human_assigned(mut self) -> Self {
        self.provenance = Some(Provenance::Human);
        self
    }

    pub fn crowdsourced(mut self) -> Self {
        self.provenance = Some(Provenance::Crowdsourced);
        self
    }

    pub fn bootstrapped(mut self) -> Self {
        self.provenance = Some(Provenance::Bootstrapped);
        self
    }

    /// Sets the confidence, a number between 0 and 1.
    pub fn with_confidence(mut self, confidence: f64) -> Result<Self, BuilderError> {
        require_unit_interval("confidence", confidence)?;
        self.confidence = Some(confidence);
        Ok(self)
    }

    pub fn with_task(mut self, task: &str) -> Result<Self, BuilderError> {
        require_text("task", task)?;
        self.task = Some(task.to_string());
        Ok(self)
    }

    pub fn with_label(mut self, label: &str) -> Result<Self, BuilderError> {
        require_text("label", label)?;
        self.label = Some(label.to_string());
        Ok(self)
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Sets the annotated text of a span annotation.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Marks the label as *not* applying to the document.
    pub fn is_negative(mut self) -> Self {
        self.is_negated = Some(true);
        self
    }

    pub fn is_positive(mut self) -> Self {
        self.is_negated = Some(false);
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

    /// Sets the review status. Trainability follows from the status.
    pub fn with_status(mut self, status: AnnotationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Parses and sets the review status: one of `final`, `Gold`, `reviewed`
    /// or `assigned`.
    pub fn with_status_str(self, status: &str) -> Result<Self, BuilderError> {
        let parsed = status
            .parse::<AnnotationStatus>()
            .map_err(|_| BuilderError::invalid("status", format!("unknown status {status:?}")))?;
        Ok(self.with_status(parsed))
    }

    /// Sets the span length in characters. Zero-length spans are rejected.
    pub fn with_length(mut self, length: u64) -> Result<Self, BuilderError> {
        if length == 0 {
            return Err(BuilderError::invalid("length", "span length must be positive"));
        }
        self.length = Some(length);
        Ok(self)
    }

    /// Sets the span offset in characters. `0` is the start of the document.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Validates the annotation and returns it as a one-element list, the
    /// shape `create_annotations` expects.
    ///
    /// ## Errors
    ///
    /// - [`BuilderError::MissingField`] if task or label is unset
    /// - [`BuilderError::SpanPairing`] if only one of offset and length is set
    pub fn to_options(&self) -> Result<Vec<AnnotationOptions>, BuilderError> {
        let (Some(task), Some(label)) = (&self.task, &self.label) else {
            return Err(BuilderError::MissingField {
                builder: "Annotation",
                fields: &["task", "label"],
            });
        };

        if self.offset.is_some() != self.length.is_some() {
            return Err(BuilderError::SpanPairing);
        }

        Ok(vec![AnnotationOptions {
            task: task.clone(),
            label: label.clone(),
            provenance: self.provenance,
            confidence: self.confidence,
            reason: self.reason.clone(),
            is_negated: self.is_negated,
            status: self.status,
            is_trainable: self.status.map(AnnotationStatus::is_trainable),
            offset: self.offset,
            length: self.length,
            text: self.text.clone(),
            is_active: self.is_active,
        }])
    }
}
