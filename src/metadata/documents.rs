//! Fixed GraphQL documents sent to DataHub.
//!
//! Every value reaches the server through a variable. Mutations that differ
//! only by field name get one constant each; none of these strings is ever
//! formatted at runtime.

pub const LIST_INGESTION_SOURCES: &str = r"
query listIngestionSources($input: ListIngestionSourcesInput!) {
  listIngestionSources(input: $input) {
    start
    count
    total
    ingestionSources {
      urn
      name
      type
      schedule {
        interval
        timezone
      }
      platform {
        name
      }
      config {
        version
        executorId
        recipe
      }
    }
  }
}
";

pub const CREATE_INGESTION_SOURCE: &str = r"
mutation createIngestionSource($input: UpdateIngestionSourceInput!) {
  createIngestionSource(input: $input)
}
";

pub const UPDATE_INGESTION_SOURCE: &str = r"
mutation updateIngestionSource($urn: String!, $input: UpdateIngestionSourceInput!) {
  updateIngestionSource(urn: $urn, input: $input)
}
";

pub const CREATE_SECRET: &str = r"
mutation createSecret($input: CreateSecretInput!) {
  createSecret(input: $input)
}
";

/// Shared by every `searchAcrossEntities` call; fragments cover the entity
/// kinds the typed wrappers read.
pub const SEARCH_ACROSS_ENTITIES: &str = r"
query searchAcrossEntities($input: SearchAcrossEntitiesInput!) {
  searchAcrossEntities(input: $input) {
    start
    count
    total
    searchResults {
      entity {
        urn
        type
        ... on Container {
          properties {
            name
          }
          editableProperties {
            description
          }
        }
        ... on Dataset {
          name
          properties {
            name
          }
          editableProperties {
            description
          }
          schemaMetadata {
            fields {
              fieldPath
            }
          }
        }
        ... on DataPlatform {
          properties {
            displayName
          }
        }
      }
    }
  }
}
";

/// Shared by every single-type `search` call.
pub const SEARCH: &str = r"
query search($input: SearchInput!) {
  search(input: $input) {
    start
    count
    total
    searchResults {
      entity {
        urn
        type
        ... on Dataset {
          name
          properties {
            name
          }
          tags {
            tags {
              tag {
                urn
                name
              }
              associatedUrn
            }
          }
        }
      }
    }
  }
}
";

pub const CONTAINER_ENTITIES: &str = r"
query containerEntities($urn: String!) {
  container(urn: $urn) {
    entities {
      start
      count
      total
      searchResults {
        entity {
          urn
          type
        }
      }
    }
  }
}
";

pub const UPDATE_CONTAINER_DESCRIPTION: &str = r"
mutation updateDescription($input: DescriptionUpdateInput!) {
  updateDescription(input: $input)
}
";

pub const UPDATE_DATASET_DESCRIPTION: &str = r"
mutation updateDataset($urn: String!, $input: DatasetUpdateInput!) {
  updateDataset(urn: $urn, input: $input) {
    editableProperties {
      description
    }
  }
}
";

pub const DATASET_CUSTOM_PROPERTIES: &str = r"
query datasetCustomProperties($urn: String!) {
  dataset(urn: $urn) {
    urn
    name
    properties {
      customProperties {
        key
        value
        associatedUrn
      }
    }
  }
}
";

pub const DATASET_TAGS: &str = r"
query datasetTags($urn: String!) {
  dataset(urn: $urn) {
    urn
    name
    tags {
      tags {
        tag {
          urn
          name
          description
        }
        associatedUrn
      }
    }
  }
}
";

pub const CREATE_TAG: &str = r"
mutation createTag($input: CreateTagInput!) {
  createTag(input: $input)
}
";

pub const DELETE_TAG: &str = r"
mutation deleteTag($urn: String!) {
  deleteTag(urn: $urn)
}
";

pub const TAG: &str = r"
query tag($urn: String!) {
  tag(urn: $urn) {
    urn
    properties {
      name
      description
    }
  }
}
";

pub const BATCH_ADD_TAGS: &str = r"
mutation batchAddTags($tagUrns: [String!]!, $resources: [ResourceRefInput!]!) {
  batchAddTags(input: { tagUrns: $tagUrns, resources: $resources })
}
";

pub const BATCH_REMOVE_TAGS: &str = r"
mutation batchRemoveTags($tagUrns: [String!]!, $resources: [ResourceRefInput!]!) {
  batchRemoveTags(input: { tagUrns: $tagUrns, resources: $resources })
}
";
