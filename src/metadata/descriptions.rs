//! Description updates and dataset lookups.

use serde_json::json;

use crate::clients::graphql::{GraphqlRequest, GraphqlTransport};
use crate::metadata::documents;
use crate::metadata::errors::require_non_empty;
use crate::metadata::types::{Dataset, EditableProperties};
use crate::metadata::{DataHubClient, DataHubError};

/// The kind of entity whose description is being changed.
///
/// DataHub exposes a different mutation for each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DescriptionTarget {
    /// `updateDescription`, which returns only a success flag.
    Container,
    /// `updateDataset`, which echoes the stored editable properties.
    Dataset,
}

impl<T: GraphqlTransport> DataHubClient<T> {
    /// Replaces the editable description of a container or dataset.
    ///
    /// Returns the description as stored. For containers the server only
    /// acknowledges the write, so the echo is the submitted text; `None`
    /// means the server declined the update.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty URN, and
    /// [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn update_description(
        &self,
        urn: &str,
        description: &str,
        target: DescriptionTarget,
    ) -> Result<Option<EditableProperties>, DataHubError> {
        require_non_empty("urn", urn)?;

        match target {
            DescriptionTarget::Container => {
                let request = GraphqlRequest::new(documents::UPDATE_CONTAINER_DESCRIPTION)
                    .operation_name("updateDescription")
                    .variable(
                        "input",
                        json!({ "description": description, "resourceUrn": urn }),
                    );
                let updated: Option<bool> = self.fetch(request, "updateDescription").await?;
                Ok(updated.unwrap_or(false).then(|| EditableProperties {
                    description: Some(description.to_string()),
                }))
            }
            DescriptionTarget::Dataset => {
                #[derive(serde::Deserialize)]
                #[serde(rename_all = "camelCase")]
                struct UpdatedDataset {
                    editable_properties: Option<EditableProperties>,
                }

                let request = GraphqlRequest::new(documents::UPDATE_DATASET_DESCRIPTION)
                    .operation_name("updateDataset")
                    .variable("urn", urn)
                    .variable(
                        "input",
                        json!({ "editableProperties": { "description": description } }),
                    );
                let updated: Option<UpdatedDataset> = self.fetch(request, "updateDataset").await?;
                Ok(updated.and_then(|d| d.editable_properties))
            }
        }
    }

    /// Fetches a dataset's custom properties; `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty URN, and
    /// [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn get_dataset_custom_properties(
        &self,
        urn: &str,
    ) -> Result<Option<Dataset>, DataHubError> {
        self.get_dataset(documents::DATASET_CUSTOM_PROPERTIES, "datasetCustomProperties", urn)
            .await
    }

    /// Fetches a dataset's tags; `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty URN, and
    /// [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn get_dataset_tags(&self, urn: &str) -> Result<Option<Dataset>, DataHubError> {
        self.get_dataset(documents::DATASET_TAGS, "datasetTags", urn)
            .await
    }

    async fn get_dataset(
        &self,
        document: &'static str,
        operation: &'static str,
        urn: &str,
    ) -> Result<Option<Dataset>, DataHubError> {
        require_non_empty("urn", urn)?;
        let request = GraphqlRequest::new(document)
            .operation_name(operation)
            .variable("urn", urn);
        self.fetch(request, "dataset").await
    }
}
