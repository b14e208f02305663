//! The GraphQL request type.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::{Map, Value};

/// A GraphQL document paired with its variables.
///
/// Values always travel as variables; nothing is ever spliced into the
/// document text. Documents used by [`DataHubClient`](crate::DataHubClient)
/// are `'static` constants, but callers of the raw
/// [`execute`](crate::DataHubClient::execute) primitive may pass owned text.
///
/// Serializes to the standard `{"query", "variables", "operationName"}`
/// request body.
///
/// # Example
///
/// ```rust
/// use datahub_edp::clients::graphql::GraphqlRequest;
///
/// let request = GraphqlRequest::new("query tag($urn: String!) { tag(urn: $urn) { urn } }")
///     .operation_name("tag")
///     .variable("urn", "urn:li:tag:pii");
///
/// assert_eq!(request.variables["urn"], "urn:li:tag:pii");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphqlRequest {
    /// The GraphQL document text.
    pub query: Cow<'static, str>,
    /// Variable bindings, keyed by variable name (without the `$`).
    pub variables: Map<String, Value>,
    /// The operation to run when the document defines several.
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphqlRequest {
    /// Creates a request with no variables.
    #[must_use]
    pub fn new(query: impl Into<Cow<'static, str>>) -> Self {
        Self {
            query: query.into(),
            variables: Map::new(),
            operation_name: None,
        }
    }

    /// Sets the operation name.
    #[must_use]
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Binds a single variable, replacing any previous binding of `name`.
    #[must_use]
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }
}
