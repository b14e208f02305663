//! HTTP client for DataHub GraphQL communication.
//!
//! This module provides the [`HttpClient`] type, which posts JSON bodies to
//! the configured GraphQL endpoint with the bearer token attached.

use std::collections::HashMap;

use serde::Serialize;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_response::HttpResponse;
use crate::config::DataHubConfig;
use crate::error::ConfigError;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to DataHub.
///
/// The client handles:
/// - Default headers including User-Agent and the bearer token
/// - Per-client TLS verification settings
/// - JSON body parsing and non-2xx error serialization
///
/// Each call to [`post_json`](Self::post_json) makes exactly one attempt.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use datahub_edp::clients::HttpClient;
/// use serde_json::json;
///
/// let client = HttpClient::new(&config)?;
/// let response = client.post_json(&json!({ "query": "{ me { corpUser { urn } } }" })).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Full URL requests are posted to.
    endpoint: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// When the configuration disables TLS verification, only this client
    /// accepts invalid certificates and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the underlying reqwest
    /// client cannot be created (e.g. TLS backend initialization failure).
    pub fn new(config: &DataHubConfig) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}DataHub EDP Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", config.token().as_ref()),
        );

        if !config.verify_tls() {
            tracing::warn!(
                "TLS certificate verification is disabled for DataHub endpoint {}",
                config.endpoint()
            );
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(!config.verify_tls())
            .build()
            .map_err(|e| ConfigError::HttpClientBuild {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint().as_ref().to_string(),
            default_headers,
        })
    }

    /// Returns the URL requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Posts `body`, encoded as JSON, to the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - The body cannot be encoded, or a network or TLS error occurs (`Network`)
    /// - A non-2xx response is received (`Response`)
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> Result<HttpResponse, HttpError> {
        let mut req_builder = self.client.post(&self.endpoint);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        let res = req_builder.json(body).send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let body = if body_text.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text)
                .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
        };

        let response = HttpResponse::new(code, res_headers, body);
        if response.is_ok() {
            return Ok(response);
        }

        tracing::debug!("DataHub responded with HTTP {}", code);
        Err(HttpError::Response(HttpResponseError {
            code,
            message: Self::serialize_error(&response),
            error_reference: response.request_id().map(String::from),
        }))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Serializes an error response to a compact JSON string.
    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        for key in ["errors", "message", "error", "raw_body"] {
            if let Some(value) = response.body.get(key) {
                error_body.insert(key.to_string(), value.clone());
            }
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, GraphqlEndpoint};
    use serde_json::json;

    fn create_test_config(verify_tls: bool) -> DataHubConfig {
        DataHubConfig::builder()
            .endpoint(GraphqlEndpoint::new("https://datahub.example.com/api/graphql").unwrap())
            .token(AccessToken::new("test-token").unwrap())
            .verify_tls(verify_tls)
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_uses_configured_endpoint() {
        let client = HttpClient::new(&create_test_config(true)).unwrap();
        assert_eq!(client.endpoint(), "https://datahub.example.com/api/graphql");
    }

    #[test]
    fn test_bearer_token_header_injection() {
        let client = HttpClient::new(&create_test_config(true)).unwrap();
        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"Bearer test-token".to_string())
        );
    }

    #[test]
    fn test_json_content_type_and_accept_headers() {
        let client = HttpClient::new(&create_test_config(true)).unwrap();
        assert_eq!(
            client.default_headers().get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config(true)).unwrap();
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("DataHub EDP Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = DataHubConfig::builder()
            .endpoint(GraphqlEndpoint::new("https://datahub.example.com/api/graphql").unwrap())
            .token(AccessToken::new("test-token").unwrap())
            .user_agent_prefix("catalog-sync/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("catalog-sync/1.0 | "));
    }

    #[test]
    fn test_client_builds_without_tls_verification() {
        let client = HttpClient::new(&create_test_config(false));
        assert!(client.is_ok());
    }

    #[test]
    fn test_serialize_error_collects_known_fields() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["req-1".to_string()]);
        let response = HttpResponse::new(
            401,
            headers,
            json!({ "message": "Unauthorized", "ignored": true }),
        );

        let serialized: serde_json::Value =
            serde_json::from_str(&HttpClient::serialize_error(&response)).unwrap();
        assert_eq!(serialized["message"], "Unauthorized");
        assert!(serialized.get("ignored").is_none());
        assert!(serialized["error_reference"]
            .as_str()
            .unwrap()
            .contains("req-1"));
    }
}
