//! Layered error types for the client.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`ApiError`] - Top-level error type for all client operations
//! - [`BuilderError`] - Invalid arguments rejected by an option builder
//! - [`ClientError`] - HTTP client and network errors
//! - [`ResponseError`] - Response bodies that could not be turned into a value
//! - [`LabelError`] - Label resolution failures during a rename
//! - [`ConfigError`] - Client configuration errors
//! - [`PathError`] - Request path formatting errors

mod api_error;
mod builder_error;
mod client_error;
mod config_error;
mod label_error;
mod path_error;
mod response_error;

pub use api_error::ApiError;
pub use builder_error::BuilderError;
pub(crate) use builder_error::{require_text, require_unit_interval};
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use label_error::LabelError;
pub use path_error::PathError;
pub use response_error::ResponseError;
