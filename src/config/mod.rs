//! Configuration types for the DataHub client.
//!
//! # Overview
//!
//! - [`DataHubConfig`]: connection settings for a single DataHub instance
//! - [`DataHubConfigBuilder`]: a builder for constructing [`DataHubConfig`]
//! - [`GraphqlEndpoint`]: a validated GraphQL endpoint URL
//! - [`AccessToken`]: a validated bearer token with masked debug output
//!
//! # Example
//!
//! ```rust
//! use datahub_edp::{AccessToken, DataHubConfig, GraphqlEndpoint};
//!
//! let config = DataHubConfig::builder()
//!     .endpoint(GraphqlEndpoint::new("https://datahub.example.com/api/graphql").unwrap())
//!     .token(AccessToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert!(config.verify_tls());
//! ```

mod newtypes;

pub use newtypes::{AccessToken, GraphqlEndpoint};

use crate::error::ConfigError;

/// Connection settings for a DataHub instance.
///
/// The configuration is immutable once built. A client built from it
/// holds its own copy, so the same configuration can seed many clients.
///
/// # TLS Verification
///
/// Certificate verification is on by default. Turning it off with
/// [`DataHubConfigBuilder::verify_tls`] only affects clients created from
/// this configuration; nothing process-wide is changed.
#[derive(Clone, Debug)]
pub struct DataHubConfig {
    endpoint: GraphqlEndpoint,
    token: AccessToken,
    verify_tls: bool,
    user_agent_prefix: Option<String>,
}

impl DataHubConfig {
    /// Creates a new builder for constructing a `DataHubConfig`.
    #[must_use]
    pub fn builder() -> DataHubConfigBuilder {
        DataHubConfigBuilder::new()
    }

    /// Returns the GraphQL endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &GraphqlEndpoint {
        &self.endpoint
    }

    /// Returns the bearer token.
    #[must_use]
    pub const fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Returns whether TLS certificates are verified.
    #[must_use]
    pub const fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify DataHubConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DataHubConfig>();
};

/// Builder for constructing [`DataHubConfig`] instances.
///
/// Required fields are `endpoint` and `token`.
///
/// # Defaults
///
/// - `verify_tls`: `true`
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use datahub_edp::{AccessToken, DataHubConfig, GraphqlEndpoint};
///
/// let config = DataHubConfig::builder()
///     .endpoint(GraphqlEndpoint::new("https://datahub.internal/api/graphql").unwrap())
///     .token(AccessToken::new("token").unwrap())
///     .verify_tls(false)
///     .user_agent_prefix("metadata-sync/2.1")
///     .build()
///     .unwrap();
///
/// assert!(!config.verify_tls());
/// ```
#[derive(Debug, Default)]
pub struct DataHubConfigBuilder {
    endpoint: Option<GraphqlEndpoint>,
    token: Option<AccessToken>,
    verify_tls: Option<bool>,
    user_agent_prefix: Option<String>,
}

impl DataHubConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the GraphQL endpoint (required).
    #[must_use]
    pub fn endpoint(mut self, endpoint: GraphqlEndpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the bearer token (required).
    #[must_use]
    pub fn token(mut self, token: AccessToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets whether TLS certificates are verified.
    #[must_use]
    pub const fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = Some(verify);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`DataHubConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `endpoint` or
    /// `token` are not set.
    pub fn build(self) -> Result<DataHubConfig, ConfigError> {
        let endpoint = self
            .endpoint
            .ok_or(ConfigError::MissingRequiredField { field: "endpoint" })?;
        let token = self
            .token
            .ok_or(ConfigError::MissingRequiredField { field: "token" })?;

        Ok(DataHubConfig {
            endpoint,
            token,
            verify_tls: self.verify_tls.unwrap_or(true),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> GraphqlEndpoint {
        GraphqlEndpoint::new("https://datahub.example.com/api/graphql").unwrap()
    }

    #[test]
    fn test_builder_requires_endpoint() {
        let result = DataHubConfigBuilder::new()
            .token(AccessToken::new("token").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "endpoint" })
        ));
    }

    #[test]
    fn test_builder_requires_token() {
        let result = DataHubConfigBuilder::new().endpoint(endpoint()).build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "token" })
        ));
    }

    #[test]
    fn test_builder_verifies_tls_by_default() {
        let config = DataHubConfig::builder()
            .endpoint(endpoint())
            .token(AccessToken::new("token").unwrap())
            .build()
            .unwrap();

        assert!(config.verify_tls());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = DataHubConfig::builder()
            .endpoint(endpoint())
            .token(AccessToken::new("token").unwrap())
            .verify_tls(false)
            .user_agent_prefix("sync-job/1.0")
            .build()
            .unwrap();

        assert!(!config.verify_tls());
        assert_eq!(config.user_agent_prefix(), Some("sync-job/1.0"));
        assert_eq!(config.endpoint(), &endpoint());
        assert_eq!(config.token().as_ref(), "token");
    }

    #[test]
    fn test_config_debug_does_not_leak_token() {
        let config = DataHubConfig::builder()
            .endpoint(endpoint())
            .token(AccessToken::new("very-secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("DataHubConfig"));
        assert!(!debug_str.contains("very-secret"));
    }
}
