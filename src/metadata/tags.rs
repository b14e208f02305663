//! Tag lifecycle and tag assignment.
//!
//! Adding and removing tags use different remote mutations with identical
//! inputs. [`TagOperation`] picks the mutation; the payload is built once.
//! Field-level assignment goes through the same mutations, with each
//! resource reference naming a dataset field as its sub-resource.

use serde::Serialize;

use crate::clients::graphql::{GraphqlRequest, GraphqlTransport};
use crate::metadata::documents;
use crate::metadata::errors::{require_non_empty, require_non_empty_list, to_variable};
use crate::metadata::types::Tag;
use crate::metadata::{DataHubClient, DataHubError};

/// Whether tags are being attached or detached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagOperation {
    /// Attach tags (`batchAddTags`).
    Add,
    /// Detach tags (`batchRemoveTags`).
    Remove,
}

impl TagOperation {
    /// The remote mutation field this operation is sent as.
    #[must_use]
    pub const fn mutation(self) -> &'static str {
        match self {
            Self::Add => "batchAddTags",
            Self::Remove => "batchRemoveTags",
        }
    }

    const fn document(self) -> &'static str {
        match self {
            Self::Add => documents::BATCH_ADD_TAGS,
            Self::Remove => documents::BATCH_REMOVE_TAGS,
        }
    }
}

/// Kind of sub-resource a tag can be attached to.
///
/// Only dataset fields are supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubResourceType {
    /// A schema field of a dataset, addressed by its field path.
    DatasetField,
}

/// A `ResourceRefInput`: a whole entity, or one field of a dataset.
///
/// ```rust
/// use datahub_edp::metadata::tags::ResourceRef;
///
/// let json = serde_json::to_string(&ResourceRef::new("urn:li:dataset:d1")).unwrap();
/// assert_eq!(json, r#"{"resourceUrn":"urn:li:dataset:d1"}"#);
///
/// let field = ResourceRef::dataset_field("urn:li:dataset:d1", "email");
/// let json = serde_json::to_string(&field).unwrap();
/// assert_eq!(
///     json,
///     r#"{"resourceUrn":"urn:li:dataset:d1","subResource":"email","subResourceType":"DATASET_FIELD"}"#
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    /// URN of the tagged entity.
    pub resource_urn: String,
    /// Field path within the entity, for field-level tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_resource: Option<String>,
    /// Kind of `sub_resource`; set whenever `sub_resource` is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_resource_type: Option<SubResourceType>,
}

impl ResourceRef {
    /// References a whole entity.
    #[must_use]
    pub fn new(resource_urn: impl Into<String>) -> Self {
        Self {
            resource_urn: resource_urn.into(),
            sub_resource: None,
            sub_resource_type: None,
        }
    }

    /// References one field of a dataset.
    #[must_use]
    pub fn dataset_field(resource_urn: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self {
            resource_urn: resource_urn.into(),
            sub_resource: Some(field_path.into()),
            sub_resource_type: Some(SubResourceType::DatasetField),
        }
    }
}

#[derive(Serialize)]
struct CreateTagInput<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
}

impl<T: GraphqlTransport> DataHubClient<T> {
    /// Creates a tag whose id and display name are both `name`.
    ///
    /// Returns the URN of the new tag.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty name, and
    /// [`DataHubError::RequestFailed`] if the round trip fails (including
    /// when the tag already exists).
    pub async fn create_tag(&self, name: &str, description: &str) -> Result<String, DataHubError> {
        require_non_empty("name", name)?;
        let input = CreateTagInput {
            id: name,
            name,
            description,
        };
        let request = GraphqlRequest::new(documents::CREATE_TAG)
            .operation_name("createTag")
            .variable("input", to_variable("input", &input)?);
        self.fetch(request, "createTag").await
    }

    /// Deletes a tag.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty URN, and
    /// [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn delete_tag(&self, urn: &str) -> Result<bool, DataHubError> {
        require_non_empty("urn", urn)?;
        let request = GraphqlRequest::new(documents::DELETE_TAG)
            .operation_name("deleteTag")
            .variable("urn", urn);
        self.fetch(request, "deleteTag").await
    }

    /// Looks up a tag by URN; `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty URN, and
    /// [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn search_for_tag(&self, urn: &str) -> Result<Option<Tag>, DataHubError> {
        require_non_empty("urn", urn)?;
        let request = GraphqlRequest::new(documents::TAG)
            .operation_name("tag")
            .variable("urn", urn);
        self.fetch(request, "tag").await
    }

    /// Attaches one tag to one entity.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty URN, and
    /// [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn add_tag(&self, tag_urn: &str, resource_urn: &str) -> Result<bool, DataHubError> {
        self.batch_add_tags(&[tag_urn], &[resource_urn]).await
    }

    /// Detaches one tag from one entity.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty URN, and
    /// [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn remove_tag(&self, tag_urn: &str, resource_urn: &str) -> Result<bool, DataHubError> {
        self.batch_remove_tags(&[tag_urn], &[resource_urn]).await
    }

    /// Attaches every tag to every entity in one mutation.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] if either list is empty or
    /// holds an empty URN, and [`DataHubError::RequestFailed`] if the round
    /// trip fails. A failure is reported for the whole batch.
    pub async fn batch_add_tags<S, R>(
        &self,
        tag_urns: &[S],
        resource_urns: &[R],
    ) -> Result<bool, DataHubError>
    where
        S: AsRef<str> + Sync,
        R: AsRef<str> + Sync,
    {
        let resources = entity_refs(resource_urns)?;
        self.apply_tags(TagOperation::Add, tag_urns, &resources)
            .await
    }

    /// Detaches every tag from every entity in one mutation.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] if either list is empty or
    /// holds an empty URN, and [`DataHubError::RequestFailed`] if the round
    /// trip fails. A failure is reported for the whole batch.
    pub async fn batch_remove_tags<S, R>(
        &self,
        tag_urns: &[S],
        resource_urns: &[R],
    ) -> Result<bool, DataHubError>
    where
        S: AsRef<str> + Sync,
        R: AsRef<str> + Sync,
    {
        let resources = entity_refs(resource_urns)?;
        self.apply_tags(TagOperation::Remove, tag_urns, &resources)
            .await
    }

    /// Attaches a tag to one field of a dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty URN or field
    /// path, and [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn add_field_tag(
        &self,
        tag_urn: &str,
        resource_urn: &str,
        field_path: &str,
    ) -> Result<bool, DataHubError> {
        self.apply_field_tags(TagOperation::Add, &[tag_urn], resource_urn, field_path)
            .await
    }

    /// Detaches a tag from one field of a dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty URN or field
    /// path, and [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn remove_field_tag(
        &self,
        tag_urn: &str,
        resource_urn: &str,
        field_path: &str,
    ) -> Result<bool, DataHubError> {
        self.apply_field_tags(TagOperation::Remove, &[tag_urn], resource_urn, field_path)
            .await
    }

    async fn apply_tags<S: AsRef<str> + Sync>(
        &self,
        operation: TagOperation,
        tag_urns: &[S],
        resources: &[ResourceRef],
    ) -> Result<bool, DataHubError> {
        require_non_empty_list("tag_urns", tag_urns)?;

        let tag_urns: Vec<&str> = tag_urns.iter().map(AsRef::as_ref).collect();
        let request = GraphqlRequest::new(operation.document())
            .operation_name(operation.mutation())
            .variable("tagUrns", to_variable("tag_urns", &tag_urns)?)
            .variable("resources", to_variable("resource_urns", &resources)?);
        self.fetch(request, operation.mutation()).await
    }

    /// Sub-resources are always dataset fields (`DATASET_FIELD`).
    async fn apply_field_tags(
        &self,
        operation: TagOperation,
        tag_urns: &[&str],
        resource_urn: &str,
        field_path: &str,
    ) -> Result<bool, DataHubError> {
        require_non_empty("resource_urn", resource_urn)?;
        require_non_empty("field_path", field_path)?;

        let resources = [ResourceRef::dataset_field(resource_urn, field_path)];
        self.apply_tags(operation, tag_urns, &resources).await
    }
}

fn entity_refs<R: AsRef<str>>(resource_urns: &[R]) -> Result<Vec<ResourceRef>, DataHubError> {
    require_non_empty_list("resource_urns", resource_urns)?;
    Ok(resource_urns
        .iter()
        .map(|urn| ResourceRef::new(urn.as_ref()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_names() {
        assert_eq!(TagOperation::Add.mutation(), "batchAddTags");
        assert_eq!(TagOperation::Remove.mutation(), "batchRemoveTags");
    }

    #[test]
    fn test_documents_match_operation() {
        for operation in [TagOperation::Add, TagOperation::Remove] {
            let document = operation.document();
            assert!(document.contains(&format!("{}(input:", operation.mutation())));
        }
    }

    #[test]
    fn test_add_and_remove_documents_share_variables() {
        let strip = |d: &str, name: &str| d.replace(name, "");
        assert_eq!(
            strip(documents::BATCH_ADD_TAGS, "batchAddTags"),
            strip(documents::BATCH_REMOVE_TAGS, "batchRemoveTags")
        );
    }

    #[test]
    fn test_resource_refs_serialize_as_records() {
        let resources: Vec<ResourceRef> = ["urn:li:dataset:d1", "urn:li:dataset:d2"]
            .into_iter()
            .map(ResourceRef::new)
            .collect();

        assert_eq!(
            serde_json::to_string(&resources).unwrap(),
            r#"[{"resourceUrn":"urn:li:dataset:d1"},{"resourceUrn":"urn:li:dataset:d2"}]"#
        );
    }

    #[test]
    fn test_dataset_field_ref_names_sub_resource() {
        let value = serde_json::to_value(ResourceRef::dataset_field("urn:li:dataset:d1", "email"))
            .unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "resourceUrn": "urn:li:dataset:d1",
                "subResource": "email",
                "subResourceType": "DATASET_FIELD"
            })
        );
    }

    #[test]
    fn test_entity_refs_reject_empty_list() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            entity_refs(&empty),
            Err(DataHubError::InvalidArgument {
                argument: "resource_urns",
                ..
            })
        ));
    }
}
