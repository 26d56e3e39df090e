use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{BuilderError, require_text, require_unit_interval};

/// A label's suggested confidence threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdOptions {
    pub suggested: f64,
}

/// Wire form: `{label: {"suggested": threshold}}`.
pub type ConfidenceThresholdOptions = BTreeMap<String, ThresholdOptions>;

/// Accumulates per-label confidence thresholds.
///
/// Adding a label twice replaces its threshold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfidenceThreshold {
    thresholds: ConfidenceThresholdOptions,
}

impl ConfidenceThreshold {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_threshold(mut self, label: &str, threshold: f64) -> Result<Self, BuilderError> {
        require_text("label", label)?;
        require_unit_interval("threshold", threshold)?;
        self.thresholds
            .insert(label.to_string(), ThresholdOptions { suggested: threshold });
        Ok(self)
    }

    pub fn to_options(&self) -> Result<ConfidenceThresholdOptions, BuilderError> {
        if self.thresholds.is_empty() {
            return Err(BuilderError::EmptyCollection {
                builder: "ConfidenceThreshold",
            });
        }
        Ok(self.thresholds.clone())
    }
}
