//! HTTP-specific error types for the DataHub client.
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from DataHub
//! - [`HttpError`]: Unified error type for everything below the GraphQL layer
//!
//! There is no retry-exhaustion error: every request is attempted exactly
//! once and any failure is reported to the caller as-is.
//!
//! # Example
//!
//! ```rust,ignore
//! use datahub_edp::clients::{HttpClient, HttpError};
//!
//! match client.post_json(&body).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("DataHub error {}: {}", e.code, e.message),
//!     Err(HttpError::Network(e)) => println!("Network error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request receives a non-successful response.
///
/// The message field holds a JSON object with whichever of `errors`,
/// `message`, `error`, `raw_body` and `error_reference` the response
/// carried.
///
/// # Example
///
/// ```rust
/// use datahub_edp::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 401,
///     message: r#"{"message":"Unauthorized"}"#.to_string(),
///     error_reference: None,
/// };
///
/// assert_eq!(error.to_string(), r#"HTTP 401: {"message":"Unauthorized"}"#);
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
    /// Reference ID for error reporting (from the X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Network, TLS or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
