//! Label resolution errors.

use thiserror::Error;

use super::ApiError;

/// Errors raised while renaming a task label.
#[derive(Debug, Error)]
pub enum LabelError {
    /// The label matched neither a label uuid nor a label name of the task.
    #[error("label not found: {label}")]
    NotFound {
        /// The label as passed by the caller.
        label: String,
    },

    /// The task's label list contains duplicate names, so names cannot be
    /// mapped to uuids unambiguously.
    #[error("task has duplicate label names ({unique} unique of {total})")]
    DuplicateNames {
        /// Number of distinct label names.
        unique: usize,
        /// Number of labels.
        total: usize,
    },

    /// The service answered the rename request with an error report. The
    /// configuration was left untouched.
    #[error("rename of label {uuid} rejected: {message}")]
    RenameRejected {
        /// The uuid of the label that was to be renamed.
        uuid: String,
        /// The reported error.
        message: String,
    },

    /// The label was renamed at the server, but the follow-up configuration
    /// update failed. Configuration entries still refer to the old name.
    #[error("label {uuid} renamed to {new_name}, but updating the task configuration failed: {source}")]
    PropagationFailed {
        /// The uuid of the renamed label.
        uuid: String,
        /// The name the label now carries.
        new_name: String,
        /// The error from the configuration update.
        #[source]
        source: Box<ApiError>,
    },
}
