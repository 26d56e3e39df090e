//! HTTP methods used by the Idibon API.

use strum::{Display, EnumIter, EnumString};

/// HTTP methods accepted by the Idibon REST endpoints.
///
/// The service distinguishes create (`PUT`), update (`POST`), fetch (`GET`)
/// and delete (`DELETE`) on the same resource path.
///
/// ## Examples
///
/// ```rust
/// use idibon::RestMethod;
///
/// assert_eq!(RestMethod::Put.to_string(), "PUT");
///
/// let parsed: RestMethod = "POST".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Post);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - Retrieve a resource or request a classification.
    #[default]
    Get,
    /// HTTP POST - Update a resource or add items to it.
    Post,
    /// HTTP PUT - Create a resource.
    Put,
    /// HTTP DELETE - Remove a resource or an item from it.
    Delete,
}

impl RestMethod {
    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}
