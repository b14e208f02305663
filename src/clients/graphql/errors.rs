//! GraphQL-specific error types for the DataHub client.
//!
//! Unlike a bare HTTP client, the GraphQL layer treats a non-empty `errors`
//! list in the response envelope as a failure, even when it arrives with
//! HTTP 200. Partial data accompanying such errors is discarded.
//!
//! # Example
//!
//! ```rust,ignore
//! use datahub_edp::clients::graphql::GraphqlError;
//!
//! match transport.execute(&request).await {
//!     Ok(data) => println!("Data: {}", data),
//!     Err(GraphqlError::Response { errors }) => {
//!         for error in errors {
//!             println!("GraphQL error: {}", error.message);
//!         }
//!     }
//!     Err(other) => println!("Request failed: {}", other),
//! }
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::clients::HttpError;

/// One entry of the `errors` list in a GraphQL response envelope.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphqlErrorDetail {
    /// Human-readable error message.
    pub message: String,
    /// Path of the response field that failed, if reported.
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
    /// Server-specific details such as an error code.
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
}

fn join_messages(errors: &[GraphqlErrorDetail]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error type for GraphQL operations.
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// An HTTP-level error occurred (network failure or non-2xx status).
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response envelope carried a non-empty `errors` list.
    #[error("GraphQL request failed: {}", join_messages(.errors))]
    Response {
        /// The errors reported by the server.
        errors: Vec<GraphqlErrorDetail>,
    },

    /// The response envelope carried neither data nor errors.
    #[error("GraphQL response contained no data")]
    MissingData,

    /// A response field could not be decoded into its expected shape.
    #[error("Unexpected GraphQL response for field '{field}': {source}")]
    UnexpectedResponse {
        /// The top-level response field being decoded.
        field: String,
        /// The decoding failure.
        #[source]
        source: serde_json::Error,
    },
}
