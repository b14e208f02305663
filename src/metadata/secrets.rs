//! Secrets referenced from ingestion recipes as `${name}`.

use serde::Serialize;

use crate::clients::graphql::{GraphqlRequest, GraphqlTransport};
use crate::metadata::documents;
use crate::metadata::errors::{require_non_empty, to_variable};
use crate::metadata::{DataHubClient, DataHubError};

#[derive(Serialize)]
struct CreateSecretInput<'a> {
    name: &'a str,
    value: &'a str,
    description: &'a str,
}

impl<T: GraphqlTransport> DataHubClient<T> {
    /// Stores a secret and returns its URN.
    ///
    /// The value is sent once and never logged.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty name or value,
    /// and [`DataHubError::RequestFailed`] if the round trip fails (including
    /// when a secret with that name already exists).
    pub async fn create_secret(
        &self,
        name: &str,
        value: &str,
        description: &str,
    ) -> Result<String, DataHubError> {
        require_non_empty("name", name)?;
        require_non_empty("value", value)?;

        let input = CreateSecretInput {
            name,
            value,
            description,
        };
        let request = GraphqlRequest::new(documents::CREATE_SECRET)
            .operation_name("createSecret")
            .variable("input", to_variable("input", &input)?);
        self.fetch(request, "createSecret").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_input_shape() {
        let input = CreateSecretInput {
            name: "billing_db_password",
            value: "hunter2",
            description: "",
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            serde_json::json!({
                "name": "billing_db_password",
                "value": "hunter2",
                "description": ""
            })
        );
    }
}
