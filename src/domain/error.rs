//! Hierarchical error types for the Sloth client.
//!
//! Only local and transport faults are errors. A non-2xx answer from the
//! service is data, carried by [`ApiResult`](super::ApiResult).

use thiserror::Error;

/// Top-level error returned by client operations
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl AppError {
    /// Shorthand for a rejected argument
    pub fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        Self::Validation(ValidationError::InvalidArgument {
            name,
            message: message.into(),
        })
    }

    /// True when the error was raised locally, before any network activity
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Validation(_) | Self::Serialization(_)
        )
    }
}

/// Client construction failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ApiKey not provided")]
    MissingApiKey,

    #[error("ApiKey contains characters not allowed in a header value")]
    InvalidApiKey,

    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: &'static str, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Local input validation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{name}: {message}")]
    InvalidArgument { name: &'static str, message: String },

    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("{0}")]
    Multiple(String),
}

/// Failures that prevented a response from being obtained at all
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Multiple(errors.to_string())
    }
}
