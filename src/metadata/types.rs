//! Typed records decoded from DataHub responses.
//!
//! GraphQL only returns the fields a document selects, and entity unions
//! only carry fragment fields for the matching concrete kind, so nearly
//! everything here is optional.

use serde::{Deserialize, Serialize};

/// DataHub entity kinds (the remote `EntityType` enum).
///
/// Unknown kinds returned by the server decode to [`EntityType::Other`];
/// `Other` cannot be used as a search input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Dataset,
    Container,
    DataPlatform,
    Tag,
    GlossaryTerm,
    Domain,
    Chart,
    Dashboard,
    DataFlow,
    DataJob,
    CorpUser,
    CorpGroup,
    Notebook,
    #[serde(other)]
    Other,
}

/// A paginated search response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Offset of the first result; not every endpoint echoes it.
    #[serde(default)]
    pub start: Option<u32>,
    /// Number of results in this page.
    #[serde(default)]
    pub count: Option<u32>,
    /// Number of matches on the server.
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub search_results: Vec<SearchResult>,
}

impl SearchResults {
    /// Iterates over the matched entities.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.search_results.iter().map(|r| &r.entity)
    }
}

/// One search hit.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SearchResult {
    pub entity: Entity,
}

/// An entity from a search result.
///
/// Which fields are present depends on the concrete kind: containers carry
/// `editable_properties`, datasets may also carry `schema_metadata` and
/// `tags`, data platforms carry `properties.display_name`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(default)]
    pub urn: Option<String>,
    #[serde(rename = "type", default)]
    pub entity_type: Option<EntityType>,
    /// Dataset name; other kinds put their name in `properties`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: Option<EntityProperties>,
    /// Set on containers.
    #[serde(default)]
    pub editable_properties: Option<EditableProperties>,
    /// Set on datasets when the document selects the schema.
    #[serde(default)]
    pub schema_metadata: Option<SchemaMetadata>,
    #[serde(default)]
    pub tags: Option<GlobalTags>,
}

impl Entity {
    /// Returns the best available human-readable name.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.name.as_deref().or(p.display_name.as_deref()))
            .or(self.name.as_deref())
    }

    /// Returns the dataset field paths, empty for other kinds.
    #[must_use]
    pub fn field_paths(&self) -> Vec<&str> {
        self.schema_metadata
            .iter()
            .flat_map(|m| m.fields.iter().map(|f| f.field_path.as_str()))
            .collect()
    }

    /// Returns the URNs of the tags attached to the entity.
    #[must_use]
    pub fn tag_urns(&self) -> Vec<&str> {
        self.tags.as_ref().map_or_else(Vec::new, GlobalTags::urns)
    }
}

/// System-managed properties of an entity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityProperties {
    #[serde(default)]
    pub name: Option<String>,
    /// Set on data platforms.
    #[serde(default)]
    pub display_name: Option<String>,
    /// `None` when not selected; the server may also send `null`.
    #[serde(default)]
    pub custom_properties: Option<Vec<CustomProperty>>,
}

/// A key/value pair attached to an entity by its source system.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomProperty {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    /// URN of the entity the property belongs to.
    #[serde(default)]
    pub associated_urn: Option<String>,
}

/// User-editable properties, as echoed by description updates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct EditableProperties {
    #[serde(default)]
    pub description: Option<String>,
}

/// Schema of a dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SchemaMetadata {
    #[serde(default)]
    pub fields: Vec<SchemaField>,
}

/// A column of a dataset schema.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    /// Dotted path of the field, e.g. `customer.email`.
    pub field_path: String,
}

/// Tags attached to an entity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct GlobalTags {
    #[serde(default)]
    pub tags: Vec<TagAssociation>,
}

impl GlobalTags {
    fn urns(&self) -> Vec<&str> {
        self.tags
            .iter()
            .filter_map(|t| t.tag.urn.as_deref())
            .collect()
    }
}

/// A tag attached to an entity.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagAssociation {
    pub tag: Tag,
    /// URN of the entity carrying the tag.
    #[serde(default)]
    pub associated_urn: Option<String>,
}

/// A tag entity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Tag {
    /// `urn:li:tag:<id>`.
    #[serde(default)]
    pub urn: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Name and description as edited in the UI.
    #[serde(default)]
    pub properties: Option<TagProperties>,
}

/// Editable properties of a tag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TagProperties {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A dataset looked up by URN.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Dataset {
    pub urn: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Carries the custom properties when selected.
    #[serde(default)]
    pub properties: Option<EntityProperties>,
    #[serde(default)]
    pub tags: Option<GlobalTags>,
}

impl Dataset {
    /// Returns the dataset's custom properties, empty when none were selected.
    #[must_use]
    pub fn custom_properties(&self) -> &[CustomProperty] {
        self.properties
            .as_ref()
            .and_then(|p| p.custom_properties.as_deref())
            .unwrap_or_default()
    }

    /// Returns the URNs of the tags attached to the dataset.
    #[must_use]
    pub fn tag_urns(&self) -> Vec<&str> {
        self.tags.as_ref().map_or_else(Vec::new, GlobalTags::urns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_type_wire_names() {
        assert_eq!(serde_json::to_value(EntityType::Dataset).unwrap(), "DATASET");
        assert_eq!(
            serde_json::to_value(EntityType::DataPlatform).unwrap(),
            "DATA_PLATFORM"
        );
        assert_eq!(
            serde_json::to_value(EntityType::GlossaryTerm).unwrap(),
            "GLOSSARY_TERM"
        );
    }

    #[test]
    fn test_unknown_entity_type_decodes_to_other() {
        let kind: EntityType = serde_json::from_value(json!("ML_MODEL")).unwrap();
        assert_eq!(kind, EntityType::Other);
    }

    #[test]
    fn test_dataset_entity_decodes_fragment_fields() {
        let entity: Entity = serde_json::from_value(json!({
            "urn": "urn:li:dataset:(urn:li:dataPlatform:kafka,orders,PROD)",
            "type": "DATASET",
            "name": "orders",
            "properties": { "name": "orders" },
            "schemaMetadata": { "fields": [{ "fieldPath": "id" }, { "fieldPath": "amount" }] },
            "tags": { "tags": [{ "tag": { "urn": "urn:li:tag:pii", "name": "pii" }, "associatedUrn": "x" }] }
        }))
        .unwrap();

        assert_eq!(entity.entity_type, Some(EntityType::Dataset));
        assert_eq!(entity.display_name(), Some("orders"));
        assert_eq!(entity.field_paths(), vec!["id", "amount"]);
        assert_eq!(entity.tag_urns(), vec!["urn:li:tag:pii"]);
    }

    #[test]
    fn test_entity_without_fragment_match_is_empty() {
        // A non-dataset hit in a dataset-only selection comes back as `{}`.
        let entity: Entity = serde_json::from_value(json!({})).unwrap();
        assert!(entity.urn.is_none());
        assert!(entity.field_paths().is_empty());
        assert!(entity.tag_urns().is_empty());
    }

    #[test]
    fn test_data_platform_display_name() {
        let entity: Entity = serde_json::from_value(json!({
            "urn": "urn:li:dataPlatform:postgres",
            "type": "DATA_PLATFORM",
            "properties": { "displayName": "PostgreSQL" }
        }))
        .unwrap();
        assert_eq!(entity.display_name(), Some("PostgreSQL"));
    }

    #[test]
    fn test_search_results_tolerate_missing_start() {
        let results: SearchResults = serde_json::from_value(json!({
            "count": 1,
            "total": 7,
            "searchResults": [{ "entity": { "urn": "urn:li:container:abc", "type": "CONTAINER" } }]
        }))
        .unwrap();

        assert_eq!(results.start, None);
        assert_eq!(results.total, Some(7));
        assert_eq!(results.entities().count(), 1);
    }

    #[test]
    fn test_dataset_custom_properties() {
        let dataset: Dataset = serde_json::from_value(json!({
            "urn": "urn:li:dataset:d1",
            "name": "d1",
            "properties": {
                "customProperties": [
                    { "key": "owner_team", "value": "billing", "associatedUrn": "urn:li:dataset:d1" }
                ]
            }
        }))
        .unwrap();

        assert_eq!(dataset.custom_properties().len(), 1);
        assert_eq!(dataset.custom_properties()[0].key, "owner_team");
        assert!(dataset.tag_urns().is_empty());
    }
}
