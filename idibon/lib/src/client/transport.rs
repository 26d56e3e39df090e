//! Request execution with tracing instrumentation.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::{Span, field::Empty, instrument};
use url::Url;

use super::IdibonClient;
use crate::error::{ApiError, ClientError, ResponseError};
use crate::method::RestMethod;

impl IdibonClient {
    /// Sends one request and returns the parsed JSON body.
    ///
    /// `path` is appended to the base URL as-is, so dynamic segments must
    /// already be encoded with [`encode_path`](crate::encode_path). The body
    /// is sent as JSON for every method, GET included; `None` sends `{}`.
    ///
    /// Requests beyond the configured `max_sockets` wait for a free slot.
    ///
    /// ## Errors
    ///
    /// - [`ClientError::Request`] or [`ClientError::Timeout`] when no response
    ///   arrives
    /// - [`ResponseError::EmptyResponse`], [`ResponseError::MalformedResponse`]
    ///   or [`ResponseError::UnexpectedNull`] for unusable bodies
    /// - [`ClientError::HttpStatus`] for any other body on a non-2xx status;
    ///   the parsed body stays available through
    ///   [`ApiError::response_body`]
    #[instrument(
        name = "idibon_request",
        skip_all,
        fields(
            http.method = %method,
            http.path = %path,
            http.status_code = Empty,
            otel.kind = "client",
            otel.status_code = Empty,
        )
    )]
    pub async fn call_api<B>(
        &self,
        method: RestMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let payload = match body {
            Some(body) => serde_json::to_vec(body).map_err(ClientError::Serialize)?,
            None => b"{}".to_vec(),
        };
        let url = self.request_url(path)?;

        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| ClientError::Connection("request queue closed".to_string()))?;

        let response = self
            .http
            .request(method.to_reqwest(), url)
            .basic_auth(&self.api_key, Some(""))
            .body(payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        let result = interpret_body(status, text);

        let otel_status = if result.is_ok() { "OK" } else { "ERROR" };
        Span::current().record("otel.status_code", otel_status);

        result
    }

    /// `GET path` with an empty JSON body.
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.call_api::<Value>(RestMethod::Get, path, None).await
    }

    fn request_url(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        let full = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };
        Url::parse(&full)
            .map_err(|e| ClientError::Connection(format!("invalid URL {full}: {e}")).into())
    }

    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout {
                duration_ms: u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            ClientError::Request(err)
        }
    }
}

/// Turns a status and body into the call result.
///
/// Body anomalies are reported the same way for every status. A usable body
/// on a non-2xx status becomes [`ClientError::HttpStatus`] carrying that body.
fn interpret_body(status: StatusCode, body: String) -> Result<Value, ApiError> {
    let code = status.as_u16();

    if body.trim().is_empty() {
        return Err(ResponseError::EmptyResponse.into());
    }

    let value = match serde_json::from_str::<Value>(&body) {
        Ok(Value::Null) => return Err(ResponseError::UnexpectedNull { status: code }.into()),
        Ok(value) => value,
        Err(source) => return Err(ResponseError::MalformedResponse { body, source }.into()),
    };

    if status.is_success() {
        return Ok(value);
    }

    Err(ClientError::HttpStatus {
        status: code,
        message: error_message(status, &value),
        body: value,
    }
    .into())
}

/// The service's `error` text, falling back to the status reason.
fn error_message(status: StatusCode, body: &Value) -> String {
    match body.get("error") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
        Some(other) => other.to_string(),
    }
}
