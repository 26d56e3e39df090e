//! Client library for the Idibon text annotation and classification API.
//!
//! The crate has two halves:
//!
//! - **Option builders** ([`builders`]) accumulate fields through chained
//!   setters and produce validated, serializable request payloads.
//! - **[`IdibonClient`]** sends those payloads to the service over HTTPS with
//!   basic authentication and returns the parsed JSON response.
//!
//! ## Features
//!
//! - **Validated payloads**: range and required-field checks run before any
//!   network activity and fail with [`BuilderError`]
//! - **Percent-encoded paths**: collection, task and document names may contain
//!   `/`, spaces and other reserved characters
//! - **Cursor pagination**: [`IdibonClient::fetch_documents`] streams every
//!   document of a collection to a callback, page by page
//! - **Label rename**: [`IdibonClient::rename_label`] resolves a label by name or
//!   uuid and propagates the new name into the task configuration
//! - **Layered error handling**: structured errors for each failure mode
//!
//! ## Example
//!
//! ```rust,no_run
//! use idibon::IdibonClient;
//! use idibon::builders::{Task, TaskScope};
//!
//! # async fn example() -> Result<(), idibon::ApiError> {
//! let client = IdibonClient::builder("MY_API_KEY").build()?;
//!
//! let task = Task::for_name("sentiment", "Overall sentiment", TaskScope::Document)?
//!     .is_activated()
//!     .to_options()?;
//!
//! let response = client.create_task("reviews", &task).await?;
//! println!("{response}");
//! # Ok(())
//! # }
//! ```

pub mod builders;
pub mod client;
pub mod config;
pub mod error;
pub mod method;
pub mod models;
pub mod path;

pub use client::{FetchSummary, IdibonClient, IdibonClientBuilder, LabelRename};
pub use config::ClientConfig;
pub use error::{
    ApiError, BuilderError, ClientError, ConfigError, LabelError, PathError, ResponseError,
};
pub use method::RestMethod;
pub use path::encode_path;
