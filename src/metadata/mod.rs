//! Typed operations over DataHub's metadata catalog.
//!
//! # Overview
//!
//! - [`DataHubClient`]: one method per catalog operation
//! - [`DataHubError`]: the error every operation returns
//! - [`search`]: entity search, including the generic [`search::SearchAcrossEntities`] builder
//! - [`tags`]: tag lifecycle and entity/field tag assignment
//! - [`ingestion`]: ingestion sources and their recipes
//! - [`types`]: typed response records
//!
//! Description updates, dataset lookups and secrets are methods on
//! [`DataHubClient`] as well.
//!
//! # Example
//!
//! ```rust,ignore
//! use datahub_edp::DataHubClient;
//! use datahub_edp::metadata::search::{FacetFilter, FilterGroup, SearchAcrossEntities};
//! use datahub_edp::metadata::types::EntityType;
//!
//! let client = DataHubClient::connect("https://datahub.example.com/api/graphql", "token", true)?;
//!
//! let input = SearchAcrossEntities::new("*")
//!     .types([EntityType::Dataset])
//!     .filter_group(FilterGroup::new().with(FacetFilter::equals("origin", "PROD")))
//!     .window(0, 50);
//! let results = client.search_across_entities(&input).await?;
//!
//! let tag = client.create_tag("pii", "Personal data").await?;
//! for entity in results.entities() {
//!     client.add_tag(&tag, &entity.urn).await?;
//! }
//! ```

mod client;
mod descriptions;
pub mod documents;
mod errors;
pub mod ingestion;
pub mod search;
mod secrets;
pub mod tags;
pub mod types;

pub use client::DataHubClient;
pub use descriptions::DescriptionTarget;
pub use errors::DataHubError;
pub use ingestion::{IngestionSourcePage, IngestionSourceUpdate, Schedule, SqlIngestion};
pub use search::SearchAcrossEntities;
pub use tags::{ResourceRef, SubResourceType, TagOperation};
pub use types::{Dataset, EditableProperties, Entity, EntityType, SearchResults, Tag};
