//! Entity search.
//!
//! Two remote fields are involved: `search` (one entity type) and
//! `searchAcrossEntities` (several). Each has exactly one document; the
//! typed wrappers below only differ in the input they bind.

use serde::Serialize;

use crate::clients::graphql::{GraphqlRequest, GraphqlTransport};
use crate::metadata::documents;
use crate::metadata::errors::{require_non_empty, require_page_window, to_variable};
use crate::metadata::types::{EntityType, SearchResults};
use crate::metadata::{DataHubClient, DataHubError};

/// Default page size, matching DataHub's UI.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Query string that matches every entity.
pub const MATCH_ALL: &str = "*";

/// URN of the Kafka data platform.
pub const KAFKA_PLATFORM_URN: &str = "urn:li:dataPlatform:kafka";

/// A single facet criterion: `field` must equal one of `values`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FacetFilter {
    /// Facet name, e.g. `origin`, `platform` or `container`.
    pub field: String,
    /// Accepted values; the filter holds when the facet equals any of them.
    pub values: Vec<String>,
}

impl FacetFilter {
    /// A filter matching exactly one value.
    #[must_use]
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            values: vec![value.into()],
        }
    }
}

/// Facet filters that must all hold (`{"and": [...]}` on the wire).
///
/// A search's filter groups are OR-ed together.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterGroup {
    /// Criteria that must all hold.
    pub and: Vec<FacetFilter>,
}

impl FilterGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a criterion to the group.
    #[must_use]
    pub fn with(mut self, filter: FacetFilter) -> Self {
        self.and.push(filter);
        self
    }
}

/// Input for a `searchAcrossEntities` call.
///
/// # Example
///
/// ```rust
/// use datahub_edp::metadata::search::{FacetFilter, FilterGroup, SearchAcrossEntities};
/// use datahub_edp::EntityType;
///
/// let input = SearchAcrossEntities::new("orders")
///     .types([EntityType::Dataset])
///     .window(0, 20)
///     .filter_group(FilterGroup::new().with(FacetFilter::equals("origin", "PROD")));
///
/// assert_eq!(input.count, 20);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAcrossEntities {
    /// Entity kinds to search; empty means all kinds.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<EntityType>,
    /// Free-text query; [`MATCH_ALL`] matches everything.
    pub query: String,
    /// Offset of the first result. Must not exceed `i32::MAX`.
    pub start: u32,
    /// Page size. Must not exceed `i32::MAX`.
    pub count: u32,
    /// Alternative filter groups, OR-ed together.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub or_filters: Vec<FilterGroup>,
}

impl SearchAcrossEntities {
    /// Creates an input for the first page of `query` across all kinds.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            types: Vec::new(),
            query: query.into(),
            start: 0,
            count: DEFAULT_PAGE_SIZE,
            or_filters: Vec::new(),
        }
    }

    /// Restricts the search to the given entity kinds.
    #[must_use]
    pub fn types(mut self, types: impl IntoIterator<Item = EntityType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    /// Sets the pagination window.
    #[must_use]
    pub const fn window(mut self, start: u32, count: u32) -> Self {
        self.start = start;
        self.count = count;
        self
    }

    /// Adds an alternative group of filters.
    #[must_use]
    pub fn filter_group(mut self, group: FilterGroup) -> Self {
        self.or_filters.push(group);
        self
    }

    fn validate(&self) -> Result<(), DataHubError> {
        if self.types.contains(&EntityType::Other) {
            return Err(DataHubError::invalid(
                "types",
                "EntityType::Other is not a searchable entity kind",
            ));
        }
        require_page_window(self.start, self.count)?;
        validate_filters(&self.or_filters)
    }
}

/// Wire shape of `SearchInput` (single-type `search`).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchInput<'a> {
    #[serde(rename = "type")]
    entity_type: EntityType,
    query: &'a str,
    start: u32,
    count: u32,
    #[serde(skip_serializing_if = "no_filters")]
    or_filters: &'a [FilterGroup],
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn no_filters(groups: &&[FilterGroup]) -> bool {
    groups.is_empty()
}

fn validate_filters(groups: &[FilterGroup]) -> Result<(), DataHubError> {
    for filter in groups.iter().flat_map(|g| &g.and) {
        require_non_empty("filters", &filter.field)?;
        if filter.values.is_empty() {
            return Err(DataHubError::invalid(
                "filters",
                format!("filter on '{}' has no values", filter.field),
            ));
        }
    }
    Ok(())
}

/// Builds the AND group used by Kafka topic lookups.
fn kafka_filter_group(environment: &str, topic_name: Option<&str>) -> FilterGroup {
    let group = FilterGroup::new()
        .with(FacetFilter::equals("platform", KAFKA_PLATFORM_URN))
        .with(FacetFilter::equals("origin", environment));
    match topic_name {
        Some(name) => group.with(FacetFilter::equals("name", name)),
        None => group,
    }
}

impl<T: GraphqlTransport> DataHubClient<T> {
    /// Searches entities of one kind.
    ///
    /// `query` is free text; [`MATCH_ALL`] matches everything.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for [`EntityType::Other`] or
    /// a `start`/`count` above `i32::MAX`, and [`DataHubError::RequestFailed`]
    /// if the round trip fails.
    pub async fn search_entities(
        &self,
        entity_type: EntityType,
        query: &str,
        start: u32,
        count: u32,
    ) -> Result<SearchResults, DataHubError> {
        self.search(entity_type, query, start, count, &[]).await
    }

    /// Searches across entity kinds with arbitrary filters.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for [`EntityType::Other`],
    /// a malformed filter or a window above `i32::MAX`, and
    /// [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn search_across_entities(
        &self,
        input: &SearchAcrossEntities,
    ) -> Result<SearchResults, DataHubError> {
        input.validate()?;
        let request = GraphqlRequest::new(documents::SEARCH_ACROSS_ENTITIES)
            .operation_name("searchAcrossEntities")
            .variable("input", to_variable("input", input)?);
        self.fetch(request, "searchAcrossEntities").await
    }

    /// Lists containers.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for a `start` or `count`
    /// above `i32::MAX`, and [`DataHubError::RequestFailed`] if the round
    /// trip fails.
    pub async fn get_all_container_urns(
        &self,
        start: u32,
        count: u32,
    ) -> Result<SearchResults, DataHubError> {
        let input = SearchAcrossEntities::new(MATCH_ALL)
            .types([EntityType::Container])
            .window(start, count);
        self.search_across_entities(&input).await
    }

    /// Searches containers whose `field` equals `value`, e.g. the children
    /// of a parent container when `field` is `"container"`.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty `value` or
    /// `field`, and [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn search_container_entities(
        &self,
        value: &str,
        field: &str,
        query: &str,
        start: u32,
        count: u32,
    ) -> Result<SearchResults, DataHubError> {
        self.search_container_datasets(value, &[EntityType::Container], field, query, start, count)
            .await
    }

    /// Searches entities of the given kinds whose `field` equals `value`.
    ///
    /// Typically used with `field = "container"` and a container URN to
    /// list the datasets inside it along with their schema fields.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty `value` or
    /// `field`, and [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn search_container_datasets(
        &self,
        value: &str,
        types: &[EntityType],
        field: &str,
        query: &str,
        start: u32,
        count: u32,
    ) -> Result<SearchResults, DataHubError> {
        require_non_empty("value", value)?;
        require_non_empty("field", field)?;
        let input = SearchAcrossEntities::new(query)
            .types(types.iter().copied())
            .window(start, count)
            .filter_group(FilterGroup::new().with(FacetFilter::equals(field, value)));
        self.search_across_entities(&input).await
    }

    /// Lists the entities inside a container.
    ///
    /// Returns `None` when the container does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty URN, and
    /// [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn get_container_entities(
        &self,
        urn: &str,
    ) -> Result<Option<SearchResults>, DataHubError> {
        #[derive(serde::Deserialize)]
        struct Container {
            entities: Option<SearchResults>,
        }

        require_non_empty("urn", urn)?;
        let request = GraphqlRequest::new(documents::CONTAINER_ENTITIES)
            .operation_name("containerEntities")
            .variable("urn", urn);
        let container: Option<Container> = self.fetch(request, "container").await?;
        Ok(container.and_then(|c| c.entities))
    }

    /// Finds datasets matching `name`, including their schema field paths.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty name, and
    /// [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn get_dataset_fields(
        &self,
        name: &str,
        start: u32,
        count: u32,
    ) -> Result<SearchResults, DataHubError> {
        require_non_empty("name", name)?;
        let input = SearchAcrossEntities::new(name)
            .types([EntityType::Dataset])
            .window(start, count);
        self.search_across_entities(&input).await
    }

    /// Lists Kafka topics of an environment (fabric type such as `PROD`).
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty environment,
    /// and [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn get_kafka_topics(
        &self,
        environment: &str,
        query: &str,
        start: u32,
        count: u32,
    ) -> Result<SearchResults, DataHubError> {
        require_non_empty("environment", environment)?;
        let filters = [kafka_filter_group(environment, None)];
        self.search(EntityType::Dataset, query, start, count, &filters)
            .await
    }

    /// Looks up a Kafka topic by exact name within an environment.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty environment or
    /// topic name, and [`DataHubError::RequestFailed`] if the round trip fails.
    pub async fn get_kafka_topic_by_name(
        &self,
        environment: &str,
        topic_name: &str,
        start: u32,
        count: u32,
    ) -> Result<SearchResults, DataHubError> {
        require_non_empty("environment", environment)?;
        require_non_empty("topic_name", topic_name)?;
        let filters = [kafka_filter_group(environment, Some(topic_name))];
        self.search(EntityType::Dataset, topic_name, start, count, &filters)
            .await
    }

    async fn search(
        &self,
        entity_type: EntityType,
        query: &str,
        start: u32,
        count: u32,
        or_filters: &[FilterGroup],
    ) -> Result<SearchResults, DataHubError> {
        if entity_type == EntityType::Other {
            return Err(DataHubError::invalid(
                "entity_type",
                "EntityType::Other is not a searchable entity kind",
            ));
        }
        require_page_window(start, count)?;
        validate_filters(or_filters)?;

        let input = SearchInput {
            entity_type,
            query,
            start,
            count,
            or_filters,
        };
        let request = GraphqlRequest::new(documents::SEARCH)
            .operation_name("search")
            .variable("input", to_variable("input", &input)?);
        self.fetch(request, "search").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_across_entities_wire_shape() {
        let input = SearchAcrossEntities::new("*")
            .types([EntityType::Container])
            .window(10, 5)
            .filter_group(
                FilterGroup::new().with(FacetFilter::equals("container", "urn:li:container:abc")),
            );

        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "types": ["CONTAINER"],
                "query": "*",
                "start": 10,
                "count": 5,
                "orFilters": [{ "and": [{ "field": "container", "values": ["urn:li:container:abc"] }] }]
            })
        );
    }

    #[test]
    fn test_search_across_entities_omits_empty_types_and_filters() {
        let value = serde_json::to_value(SearchAcrossEntities::new("orders")).unwrap();
        assert!(value.get("types").is_none());
        assert!(value.get("orFilters").is_none());
        assert_eq!(value["count"], DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_validate_rejects_other_entity_type() {
        let input = SearchAcrossEntities::new("*").types([EntityType::Other]);
        assert!(matches!(
            input.validate(),
            Err(DataHubError::InvalidArgument { argument: "types", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_filter_without_values() {
        let input = SearchAcrossEntities::new("*").filter_group(FilterGroup::new().with(
            FacetFilter {
                field: "origin".to_string(),
                values: Vec::new(),
            },
        ));
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_kafka_filter_group_with_name() {
        let group = kafka_filter_group("PROD", Some("orders"));
        assert_eq!(
            serde_json::to_value(&group).unwrap(),
            json!({
                "and": [
                    { "field": "platform", "values": ["urn:li:dataPlatform:kafka"] },
                    { "field": "origin", "values": ["PROD"] },
                    { "field": "name", "values": ["orders"] }
                ]
            })
        );
    }

    #[test]
    fn test_kafka_filter_group_without_name() {
        let group = kafka_filter_group("DEV", None);
        assert_eq!(group.and.len(), 2);
        assert_eq!(group.and[1], FacetFilter::equals("origin", "DEV"));
    }

    #[test]
    fn test_search_input_wire_shape() {
        let input = SearchInput {
            entity_type: EntityType::Dataset,
            query: "orders",
            start: 0,
            count: 100,
            or_filters: &[],
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({ "type": "DATASET", "query": "orders", "start": 0, "count": 100 })
        );
    }
}
