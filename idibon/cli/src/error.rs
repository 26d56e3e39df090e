use std::path::PathBuf;

use idibon::{ApiError, BuilderError};
use thiserror::Error;

/// Failures surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: invalid JSON document: {source}", .path.display())]
    Document {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Arguments parsed but do not form a valid request.
    #[error("{0}")]
    Usage(String),
}

impl From<BuilderError> for CliError {
    fn from(err: BuilderError) -> Self {
        Self::Api(err.into())
    }
}

impl CliError {
    /// Process exit code: 2 for usage problems, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::Api(err) if err.is_invalid_argument() => 2,
            _ => 1,
        }
    }
}
