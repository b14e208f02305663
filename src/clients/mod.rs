//! Transport types for DataHub communication.
//!
//! This module provides the HTTP and GraphQL layers underneath
//! [`DataHubClient`](crate::DataHubClient).
//!
//! # Overview
//!
//! - [`HttpClient`]: posts JSON to the GraphQL endpoint with the bearer token
//! - [`HttpResponse`]: a parsed response
//! - [`HttpError`] / [`HttpResponseError`]: network and non-2xx failures
//! - [`graphql::GraphqlTransport`]: the pluggable request executor
//! - [`graphql::HttpTransport`]: the production transport
//! - [`graphql::GraphqlRequest`]: a document and its variables
//! - [`graphql::GraphqlError`]: GraphQL-level error type

mod errors;
pub mod graphql;
mod http_client;
mod http_response;

pub use errors::{HttpError, HttpResponseError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_response::HttpResponse;

// Re-export GraphQL types at the clients module level
pub use graphql::{GraphqlError, GraphqlRequest, GraphqlTransport, HttpTransport};
