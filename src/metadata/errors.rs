//! Error type for catalog operations.
//!
//! Every [`DataHubClient`](crate::DataHubClient) operation fails with one of
//! two kinds:
//!
//! - [`DataHubError::InvalidArgument`]: rejected client-side, nothing was sent
//! - [`DataHubError::RequestFailed`]: the round trip failed, for any reason
//!   (network, non-2xx status, GraphQL errors in the envelope, a response
//!   that does not decode)
//!
//! # Example
//!
//! ```rust,ignore
//! use datahub_edp::DataHubError;
//!
//! match client.create_tag("pii", "Personal data").await {
//!     Ok(urn) => println!("Created {}", urn),
//!     Err(DataHubError::InvalidArgument { argument, reason }) => {
//!         println!("Bad {}: {}", argument, reason);
//!     }
//!     Err(DataHubError::RequestFailed(e)) => println!("DataHub said no: {}", e),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

use crate::clients::graphql::GraphqlError;

/// Error type for DataHub catalog operations.
#[derive(Debug, Error)]
pub enum DataHubError {
    /// An argument failed client-side validation; no request was sent.
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The request was sent and failed.
    #[error("DataHub request failed: {0}")]
    RequestFailed(#[from] GraphqlError),
}

impl DataHubError {
    pub(crate) fn invalid(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }
}

/// Rejects empty or whitespace-only identifiers.
pub(crate) fn require_non_empty(argument: &'static str, value: &str) -> Result<(), DataHubError> {
    if value.trim().is_empty() {
        return Err(DataHubError::invalid(argument, "must not be empty"));
    }
    Ok(())
}

/// Rejects an empty list, or a list containing an empty identifier.
pub(crate) fn require_non_empty_list<S: AsRef<str>>(
    argument: &'static str,
    values: &[S],
) -> Result<(), DataHubError> {
    if values.is_empty() {
        return Err(DataHubError::invalid(argument, "must contain at least one URN"));
    }
    if let Some(position) = values.iter().position(|v| v.as_ref().trim().is_empty()) {
        return Err(DataHubError::invalid(
            argument,
            format!("entry {position} must not be empty"),
        ));
    }
    Ok(())
}

/// Rejects pagination bounds that do not fit GraphQL's signed 32-bit `Int`.
pub(crate) fn require_page_window(start: u32, count: u32) -> Result<(), DataHubError> {
    if i32::try_from(start).is_err() {
        return Err(DataHubError::invalid(
            "start",
            format!("{start} exceeds the GraphQL Int maximum of {}", i32::MAX),
        ));
    }
    if i32::try_from(count).is_err() {
        return Err(DataHubError::invalid(
            "count",
            format!("{count} exceeds the GraphQL Int maximum of {}", i32::MAX),
        ));
    }
    Ok(())
}

/// Converts a typed input into a GraphQL variable value.
pub(crate) fn to_variable<T: Serialize>(
    argument: &'static str,
    value: &T,
) -> Result<serde_json::Value, DataHubError> {
    serde_json::to_value(value).map_err(|e| DataHubError::invalid(argument, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("urn", "urn:li:tag:pii").is_ok());
        assert!(matches!(
            require_non_empty("urn", ""),
            Err(DataHubError::InvalidArgument { argument: "urn", .. })
        ));
        assert!(require_non_empty("urn", "  \t").is_err());
    }

    #[test]
    fn test_require_non_empty_list() {
        assert!(require_non_empty_list("tag_urns", &["urn:li:tag:a"]).is_ok());

        let empty: [&str; 0] = [];
        let error = require_non_empty_list("tag_urns", &empty).unwrap_err();
        assert!(error.to_string().contains("at least one URN"));

        let error = require_non_empty_list("resource_urns", &["urn:li:dataset:d1", ""]).unwrap_err();
        assert!(error.to_string().contains("entry 1"));
    }

    #[test]
    fn test_require_page_window() {
        assert!(require_page_window(0, 0).is_ok());
        assert!(require_page_window(i32::MAX as u32, i32::MAX as u32).is_ok());
        assert!(matches!(
            require_page_window(i32::MAX as u32 + 1, 10),
            Err(DataHubError::InvalidArgument { argument: "start", .. })
        ));
        assert!(matches!(
            require_page_window(0, u32::MAX),
            Err(DataHubError::InvalidArgument { argument: "count", .. })
        ));
    }

    #[test]
    fn test_request_failed_wraps_graphql_error() {
        let error: DataHubError = GraphqlError::MissingData.into();
        assert!(matches!(error, DataHubError::RequestFailed(_)));
        assert_eq!(
            error.to_string(),
            "DataHub request failed: GraphQL response contained no data"
        );
    }
}
