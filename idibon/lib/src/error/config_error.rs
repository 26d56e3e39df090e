//! Client configuration errors.

use thiserror::Error;

/// Errors in client configuration.
///
/// These errors occur while building an [`IdibonClient`](crate::IdibonClient),
/// typically indicating invalid environment values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The API key environment variable is not set.
    #[error("Missing API key: set {env_var}")]
    MissingApiKey {
        /// The environment variable that should hold the key.
        env_var: &'static str,
    },

    /// A configuration value could not be parsed.
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// The configuration field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl ConfigError {
    /// Creates an invalid value error.
    pub fn invalid_value(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::InvalidUrl(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_missing_api_key() {
        let err = ConfigError::MissingApiKey {
            env_var: "IDIBON_API_KEY",
        };
        assert_eq!(err.to_string(), "Missing API key: set IDIBON_API_KEY");
    }

    #[test]
    fn test_invalid_value() {
        let err = ConfigError::invalid_value("max_sockets", "zero");
        assert_eq!(err.to_string(), "Invalid value for max_sockets: zero");
    }
}
