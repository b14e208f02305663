//! Error types for the DataHub client.
//!
//! This module contains error types used when configuring and constructing
//! a client. Errors raised while talking to DataHub live next to the code
//! that raises them ([`crate::clients::HttpError`],
//! [`crate::clients::graphql::GraphqlError`], [`crate::DataHubError`]).
//!
//! # Example
//!
//! ```rust
//! use datahub_edp::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid DataHub personal access token.")]
    EmptyAccessToken,

    /// GraphQL endpoint is invalid.
    #[error("Invalid GraphQL endpoint '{url}'. Expected an http(s) URL (e.g., 'https://datahub.example.com/api/graphql').")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to create HTTP client: {reason}")]
    HttpClientBuild {
        /// Why construction failed.
        reason: String,
    },
}
