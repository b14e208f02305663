//! GraphQL layer for the DataHub client.
//!
//! This module sits between the typed catalog operations in
//! [`crate::metadata`] and the HTTP client. It knows the GraphQL request and
//! response envelope formats and nothing about DataHub's schema.
//!
//! # Overview
//!
//! - [`GraphqlRequest`]: a document plus its variable bindings
//! - [`GraphqlTransport`]: the trait that executes requests
//! - [`HttpTransport`]: GraphQL over HTTP POST with bearer authentication
//! - [`GraphqlError`] / [`GraphqlErrorDetail`]: failures, including
//!   GraphQL-level errors reported with HTTP 200
//!
//! # Example
//!
//! ```rust,ignore
//! use datahub_edp::clients::graphql::{GraphqlRequest, GraphqlTransport, HttpTransport};
//!
//! let transport = HttpTransport::new(&config)?;
//! let request = GraphqlRequest::new("query tag($urn: String!) { tag(urn: $urn) { urn } }")
//!     .variable("urn", "urn:li:tag:pii");
//!
//! let data = transport.execute(&request).await?;
//! println!("Tag: {}", data["tag"]);
//! ```
//!
//! # Retry Behavior
//!
//! None. Every request is attempted once; retries, timeouts and
//! cancellation belong to the caller.

mod errors;
mod request;
mod transport;

pub use errors::{GraphqlError, GraphqlErrorDetail};
pub use request::GraphqlRequest;
pub use transport::{GraphqlTransport, HttpTransport};
