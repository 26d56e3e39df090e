//! HTTP client and network errors.

use serde_json::Value;
use thiserror::Error;

use super::PathError;

/// Errors from the HTTP client layer.
///
/// These errors represent network-level failures, HTTP status errors,
/// and request construction issues that occur during request execution.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success HTTP status and a JSON body.
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
        /// The body's `error` text, or the status reason.
        message: String,
        /// The parsed response body.
        body: Value,
    },

    /// Request exceeded the configured timeout.
    #[error("Request timeout after {duration_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        duration_ms: u64,
    },

    /// Failed to build the request URL or connect to the server.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// A request path could not be formatted.
    #[error("Invalid request path: {0}")]
    InvalidPath(#[from] PathError),

    /// The request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ClientError {
    /// Returns the HTTP status code if this is an HTTP status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The parsed body of a non-success response.
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            Self::HttpStatus { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_code_extraction() {
        let err = ClientError::HttpStatus {
            status: 404,
            message: "Not Found".to_string(),
            body: json!({"error": "Not Found"}),
        };
        assert_eq!(err.status_code(), Some(404));

        let timeout = ClientError::Timeout { duration_ms: 1000 };
        assert_eq!(timeout.status_code(), None);
    }

    #[test]
    fn test_timeout_display() {
        let err = ClientError::Timeout { duration_ms: 300_000 };
        assert_eq!(err.to_string(), "Request timeout after 300000ms");
        assert!(err.response_body().is_none());
    }

    #[test]
    fn test_status_keeps_body() {
        let err = ClientError::HttpStatus {
            status: 500,
            message: "internal".to_string(),
            body: json!({"error": "internal", "id": 7}),
        };
        assert_eq!(err.response_body().unwrap()["id"], 7);
        assert_eq!(err.to_string(), "HTTP 500: internal");
    }
}
