//! The DataHub catalog client.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::graphql::{GraphqlError, GraphqlRequest, GraphqlTransport, HttpTransport};
use crate::config::{AccessToken, DataHubConfig, GraphqlEndpoint};
use crate::error::ConfigError;
use crate::metadata::DataHubError;

/// Client for DataHub's GraphQL API.
///
/// Each catalog operation builds one fixed GraphQL document plus its
/// variables and hands it to the transport: one call, one round trip. There
/// is no caching, retrying or pagination looping.
///
/// The transport is a type parameter so tests and special deployments can
/// substitute their own; [`HttpTransport`] is the default.
///
/// # Thread Safety
///
/// `DataHubClient` is `Send + Sync` whenever its transport is, which holds
/// for [`HttpTransport`]. Concurrent calls share only the immutable
/// connection settings.
///
/// # Example
///
/// ```rust,ignore
/// use datahub_edp::DataHubClient;
///
/// let client = DataHubClient::connect(
///     "https://datahub.example.com/api/graphql",
///     "my-token",
///     true,
/// )?;
///
/// let page = client.list_ingestion_sources(0, 100).await?;
/// for source in page.ingestion_sources {
///     println!("{} ({})", source.name, source.urn);
/// }
/// ```
#[derive(Debug)]
pub struct DataHubClient<T = HttpTransport> {
    transport: T,
}

// Verify DataHubClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DataHubClient>();
};

impl DataHubClient<HttpTransport> {
    /// Creates a client that talks HTTP to the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the HTTP client cannot be
    /// created.
    pub fn new(config: &DataHubConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }

    /// Creates a client from a base URL, a bearer token and a TLS flag.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the URL or token is invalid, or the HTTP
    /// client cannot be created.
    pub fn connect(base_url: &str, token: &str, verify_tls: bool) -> Result<Self, ConfigError> {
        let config = DataHubConfig::builder()
            .endpoint(GraphqlEndpoint::new(base_url)?)
            .token(AccessToken::new(token)?)
            .verify_tls(verify_tls)
            .build()?;
        Self::new(&config)
    }
}

impl<T: GraphqlTransport> DataHubClient<T> {
    /// Creates a client over an arbitrary transport.
    #[must_use]
    pub const fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Executes an arbitrary request and returns the response's `data`.
    ///
    /// This is the primitive every typed operation is built on.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn execute(&self, request: &GraphqlRequest) -> Result<Value, DataHubError> {
        tracing::debug!(
            "Dispatching DataHub operation {}",
            request.operation_name.as_deref().unwrap_or("<anonymous>")
        );
        Ok(self.transport.execute(request).await?)
    }

    /// Executes a request and decodes one top-level field of the result.
    ///
    /// An absent field decodes as `null`, so nullable results should use
    /// `Option<_>`.
    pub(crate) async fn fetch<R: DeserializeOwned>(
        &self,
        request: GraphqlRequest,
        field: &'static str,
    ) -> Result<R, DataHubError> {
        let mut data = self.execute(&request).await?;
        let value = data.get_mut(field).map_or(Value::Null, Value::take);
        serde_json::from_value(value).map_err(|source| {
            GraphqlError::UnexpectedResponse {
                field: field.to_string(),
                source,
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedTransport(Value);

    #[async_trait]
    impl GraphqlTransport for FixedTransport {
        async fn execute(&self, _request: &GraphqlRequest) -> Result<Value, GraphqlError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_connect_rejects_invalid_url() {
        let result = DataHubClient::connect("not a url", "token", true);
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_connect_rejects_empty_token() {
        let result = DataHubClient::connect("https://datahub.example.com/api/graphql", "", true);
        assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
    }

    #[test]
    fn test_connect_builds_bearer_header() {
        let client =
            DataHubClient::connect("https://datahub.example.com/api/graphql", "abc", false).unwrap();
        assert_eq!(
            client
                .transport()
                .http_client()
                .default_headers()
                .get("Authorization"),
            Some(&"Bearer abc".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_decodes_named_field() {
        let client = DataHubClient::with_transport(FixedTransport(json!({ "createTag": "urn:li:tag:x" })));
        let urn: String = client
            .fetch(GraphqlRequest::new("mutation { x }"), "createTag")
            .await
            .unwrap();
        assert_eq!(urn, "urn:li:tag:x");
    }

    #[tokio::test]
    async fn test_fetch_missing_field_is_none_for_optional() {
        let client = DataHubClient::with_transport(FixedTransport(json!({})));
        let value: Option<String> = client
            .fetch(GraphqlRequest::new("{ x }"), "tag")
            .await
            .unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_fetch_reports_shape_mismatch() {
        let client = DataHubClient::with_transport(FixedTransport(json!({ "deleteTag": "yes" })));
        let result: Result<bool, _> = client
            .fetch(GraphqlRequest::new("mutation { x }"), "deleteTag")
            .await;

        match result {
            Err(DataHubError::RequestFailed(GraphqlError::UnexpectedResponse { field, .. })) => {
                assert_eq!(field, "deleteTag");
            }
            other => panic!("expected UnexpectedResponse, got {other:?}"),
        }
    }
}
