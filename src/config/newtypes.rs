//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction, so an invalid
//! endpoint or an empty token is rejected before any client exists.

use crate::error::ConfigError;
use std::fmt;

/// A validated DataHub personal access token.
///
/// The token is sent as `Authorization: Bearer <token>` on every request.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `AccessToken(*****)`.
///
/// # Example
///
/// ```rust
/// use datahub_edp::AccessToken;
///
/// let token = AccessToken::new("eyJhbGciOi...").unwrap();
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty or
    /// whitespace only.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated GraphQL endpoint URL.
///
/// This is the full URL requests are posted to, usually
/// `https://<datahub-frontend>/api/graphql` or
/// `http://<gms>:8080/api/graphql`.
///
/// # Example
///
/// ```rust
/// use datahub_edp::GraphqlEndpoint;
///
/// let endpoint = GraphqlEndpoint::new("https://datahub.example.com/api/graphql").unwrap();
/// assert_eq!(endpoint.scheme(), "https");
/// assert_eq!(endpoint.host_name(), "datahub.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphqlEndpoint {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl GraphqlEndpoint {
    /// Creates a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the URL has no `http` or
    /// `https` scheme or an empty host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().to_string();
        let invalid = || ConfigError::InvalidEndpoint { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for GraphqlEndpoint {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for GraphqlEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_rejects_empty_string() {
        assert!(matches!(
            AccessToken::new(""),
            Err(ConfigError::EmptyAccessToken)
        ));
        assert!(matches!(
            AccessToken::new("   "),
            Err(ConfigError::EmptyAccessToken)
        ));
    }

    #[test]
    fn test_access_token_masks_value_in_debug() {
        let token = AccessToken::new("super-secret-token").unwrap();
        let debug_output = format!("{:?}", token);
        assert_eq!(debug_output, "AccessToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
        assert_eq!(token.as_ref(), "super-secret-token");
    }

    #[test]
    fn test_endpoint_accepts_http_and_https() {
        let endpoint = GraphqlEndpoint::new("https://datahub.example.com/api/graphql").unwrap();
        assert_eq!(endpoint.scheme(), "https");
        assert_eq!(endpoint.host_name(), "datahub.example.com");

        let endpoint = GraphqlEndpoint::new("http://datahub-gms:8080/api/graphql").unwrap();
        assert_eq!(endpoint.scheme(), "http");
        assert_eq!(endpoint.host_name(), "datahub-gms");
        assert_eq!(endpoint.as_ref(), "http://datahub-gms:8080/api/graphql");
    }

    #[test]
    fn test_endpoint_trims_whitespace() {
        let endpoint = GraphqlEndpoint::new("  http://localhost:9002/api/graphql\n").unwrap();
        assert_eq!(endpoint.to_string(), "http://localhost:9002/api/graphql");
    }

    #[test]
    fn test_endpoint_rejects_invalid() {
        // No scheme
        assert!(GraphqlEndpoint::new("datahub.example.com").is_err());
        // Empty host
        assert!(GraphqlEndpoint::new("https://").is_err());
        assert!(GraphqlEndpoint::new("https:///api/graphql").is_err());
        // Unsupported scheme
        assert!(GraphqlEndpoint::new("ftp://datahub.example.com").is_err());
        assert!(GraphqlEndpoint::new("://datahub.example.com").is_err());
    }
}
