//! Top-level API error type.

use super::{BuilderError, ClientError, ConfigError, LabelError, ResponseError};
use thiserror::Error;

/// Top-level error type for all client operations.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error types when needed.
///
/// ## Examples
///
/// ```rust,ignore
/// use idibon::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::Builder(e) => eprintln!("Invalid argument: {e}"),
///         ApiError::Client(e) => eprintln!("Network error: {e}"),
///         ApiError::Response(e) => eprintln!("Invalid response: {e}"),
///         ApiError::Label(e) => eprintln!("Label error: {e}"),
///         ApiError::Config(e) => eprintln!("Configuration error: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// A builder rejected its input before any request was sent.
    #[error(transparent)]
    Builder(#[from] BuilderError),

    /// HTTP client errors (network, timeout, status).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The response body was empty, not JSON, or `null`.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Label resolution or rename propagation failed.
    #[error(transparent)]
    Label(#[from] LabelError),

    /// Client configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Returns `true` if the caller passed an invalid argument.
    ///
    /// These errors are raised before any network activity and are always
    /// recoverable by correcting the input.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::Builder(_))
    }

    /// Returns the HTTP status code, if the error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client(e) => e.status_code(),
            _ => None,
        }
    }

    /// The parsed body of a non-success response, if the error carries one.
    pub fn response_body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Client(e) => e.response_body(),
            _ => None,
        }
    }
}

impl From<super::PathError> for ApiError {
    fn from(err: super::PathError) -> Self {
        Self::Client(ClientError::InvalidPath(err))
    }
}
