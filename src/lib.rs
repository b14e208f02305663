//! # DataHub EDP Library
//!
//! A Rust client for the DataHub metadata catalog's GraphQL API.
//!
//! ## Overview
//!
//! This library provides:
//! - Type-safe configuration via [`DataHubConfig`] and [`DataHubConfigBuilder`]
//! - Validated newtypes for the endpoint and bearer token
//! - A pluggable GraphQL transport ([`GraphqlTransport`]) with an HTTP
//!   implementation ([`HttpTransport`])
//! - [`DataHubClient`], with one typed method per catalog operation:
//!   ingestion sources, entity search, descriptions, datasets, tags and secrets
//!
//! ## Quick Start
//!
//! ```rust
//! use datahub_edp::{AccessToken, DataHubClient, DataHubConfig, GraphqlEndpoint};
//!
//! let config = DataHubConfig::builder()
//!     .endpoint(GraphqlEndpoint::new("https://datahub.example.com/api/graphql").unwrap())
//!     .token(AccessToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = DataHubClient::new(&config).unwrap();
//! ```
//!
//! ## Tagging Datasets
//!
//! ```rust,ignore
//! use datahub_edp::DataHubClient;
//!
//! let client = DataHubClient::connect("https://datahub.example.com/api/graphql", "token", true)?;
//!
//! let tag = client.create_tag("pii", "Personal data").await?;
//! client
//!     .batch_add_tags(&[tag.as_str()], &["urn:li:dataset:d1", "urn:li:dataset:d2"])
//!     .await?;
//! client
//!     .add_field_tag(&tag, "urn:li:dataset:d1", "customer.email")
//!     .await?;
//! ```
//!
//! ## Creating an Ingestion Source
//!
//! ```rust,ignore
//! use datahub_edp::metadata::ingestion::{
//!     DataHubSink, Schedule, SqlConnection, SqlIngestion, DEFAULT_EXECUTOR_ID, DEFAULT_TIMEZONE,
//! };
//!
//! let ingestion = SqlIngestion {
//!     name: "billing-db".to_string(),
//!     source_type: "postgres".to_string(),
//!     description: "Billing database".to_string(),
//!     schedule: Schedule::daily(3, 15, DEFAULT_TIMEZONE)?,
//!     executor_id: DEFAULT_EXECUTOR_ID.to_string(),
//!     platform_instance: "prod".to_string(),
//!     pipeline_name: "billing-db.internal".to_string(),
//!     connection: SqlConnection {
//!         host_port: "billing-db.internal:5432".to_string(),
//!         database: "billing".to_string(),
//!         username: "reader".to_string(),
//!         password: "${billing_db_password}".to_string(),
//!     },
//!     sink: DataHubSink {
//!         server: "http://datahub-gms:8080".to_string(),
//!         token: "${ingestion_token}".to_string(),
//!     },
//!     owner_urns: vec!["urn:li:corpGroup:billing".to_string()],
//!     tag_urns: vec![],
//! };
//!
//! client.create_secret("billing_db_password", "hunter2", "").await?;
//! let urn = client.create_ingestion_source(&ingestion).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: newtypes and operation arguments are checked before any I/O
//! - **One call, one round trip**: no caching, retries or hidden pagination
//! - **Variables only**: caller values never become part of a GraphQL document
//! - **Thread-safe**: the client is `Send + Sync`

pub mod clients;
pub mod config;
pub mod error;
pub mod metadata;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, DataHubConfig, DataHubConfigBuilder, GraphqlEndpoint};
pub use error::ConfigError;

// Re-export transport types
pub use clients::{
    GraphqlError, GraphqlRequest, GraphqlTransport, HttpClient, HttpError, HttpResponse,
    HttpResponseError, HttpTransport,
};

// Re-export catalog types
pub use metadata::{
    DataHubClient, DataHubError, DescriptionTarget, EntityType, ResourceRef, SearchAcrossEntities,
    SearchResults, TagOperation,
};
