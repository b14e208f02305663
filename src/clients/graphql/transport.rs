//! Pluggable GraphQL transports.
//!
//! [`GraphqlTransport`] is the seam between request construction and the
//! wire. [`HttpTransport`] is the production implementation; tests and
//! callers with special needs (proxies, recording, replay) provide their own.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::clients::graphql::{GraphqlError, GraphqlErrorDetail, GraphqlRequest};
use crate::clients::HttpClient;
use crate::config::DataHubConfig;
use crate::error::ConfigError;

/// Executes GraphQL requests and returns the `data` member of the response.
///
/// Implementations must make exactly one attempt per call and must be
/// `Send + Sync` for use across async tasks.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    /// Executes a request, returning the envelope's `data` object.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError`] for transport failures and for envelopes
    /// carrying GraphQL errors.
    async fn execute(&self, request: &GraphqlRequest) -> Result<Value, GraphqlError>;
}

#[async_trait]
impl<T: GraphqlTransport + ?Sized> GraphqlTransport for Arc<T> {
    async fn execute(&self, request: &GraphqlRequest) -> Result<Value, GraphqlError> {
        (**self).execute(request).await
    }
}

/// GraphQL over HTTP POST with bearer authentication.
#[derive(Debug)]
pub struct HttpTransport {
    http_client: HttpClient,
}

impl HttpTransport {
    /// Creates a transport for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the HTTP client cannot be
    /// created.
    pub fn new(config: &DataHubConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            http_client: HttpClient::new(config)?,
        })
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }
}

#[async_trait]
impl GraphqlTransport for HttpTransport {
    async fn execute(&self, request: &GraphqlRequest) -> Result<Value, GraphqlError> {
        let response = self.http_client.post_json(request).await?;
        extract_data(response.body)
    }
}

/// Splits a GraphQL response envelope into its data or its errors.
pub(crate) fn extract_data(mut envelope: Value) -> Result<Value, GraphqlError> {
    if let Some(errors) = envelope
        .get_mut("errors")
        .map(Value::take)
        .filter(|e| !e.is_null())
    {
        let errors: Vec<GraphqlErrorDetail> =
            serde_json::from_value(errors).map_err(|source| GraphqlError::UnexpectedResponse {
                field: "errors".to_string(),
                source,
            })?;
        if !errors.is_empty() {
            tracing::debug!("GraphQL response carried {} error(s)", errors.len());
            return Err(GraphqlError::Response { errors });
        }
    }

    match envelope.get_mut("data").map(Value::take) {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(GraphqlError::MissingData),
    }
}
