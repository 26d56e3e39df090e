//! Response body errors.

use thiserror::Error;

/// Errors turning a response body into a value.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The server answered with an empty body.
    #[error("empty response")]
    EmptyResponse,

    /// The body was not valid JSON. The raw body is kept for diagnostics.
    #[error("failed to parse response as JSON: {body}")]
    MalformedResponse {
        /// The raw response body.
        body: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The body parsed to JSON `null`.
    #[error("undefined response (status {status})")]
    UnexpectedNull {
        /// The HTTP status of the response.
        status: u16,
    },

    /// A typed response lacked a member the client relies on.
    #[error("response is missing `{field}`")]
    MissingField {
        /// The missing member.
        field: &'static str,
    },
}

impl ResponseError {
    /// Returns the raw body of a malformed response.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::MalformedResponse { body, .. } => Some(body),
            _ => None,
        }
    }
}
