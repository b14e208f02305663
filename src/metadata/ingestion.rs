//! Ingestion sources: listing, creation and full-replace updates.
//!
//! A source's recipe travels as a JSON *string* inside the GraphQL
//! variables. It is always produced by `serde_json`, so credentials with
//! quotes or backslashes cannot corrupt either the recipe or the document.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::graphql::{GraphqlRequest, GraphqlTransport};
use crate::metadata::documents;
use crate::metadata::errors::{require_non_empty, require_page_window, to_variable};
use crate::metadata::{DataHubClient, DataHubError};

/// Executor that runs ingestion inside DataHub itself.
pub const DEFAULT_EXECUTOR_ID: &str = "default";

/// Timezone used by [`Schedule::daily`] callers that have no preference.
pub const DEFAULT_TIMEZONE: &str = "UTC+03:00";

/// Sink type that writes to DataHub's REST endpoint.
pub const DATAHUB_REST_SINK: &str = "datahub-rest";

/// A cron schedule for an ingestion source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Cron expression, e.g. `"30 2 * * *"`.
    pub interval: String,
    /// Timezone name the expression is evaluated in.
    pub timezone: String,
}

impl Schedule {
    /// Creates a schedule from a cron expression.
    #[must_use]
    pub fn new(interval: impl Into<String>, timezone: impl Into<String>) -> Self {
        Self {
            interval: interval.into(),
            timezone: timezone.into(),
        }
    }

    /// Runs once a day at `hour:minute`.
    ///
    /// ```rust
    /// use datahub_edp::metadata::ingestion::Schedule;
    ///
    /// let schedule = Schedule::daily(2, 30, "UTC").unwrap();
    /// assert_eq!(schedule.interval, "30 2 * * *");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] if `hour` is not below 24
    /// or `minute` is not below 60.
    pub fn daily(hour: u8, minute: u8, timezone: impl Into<String>) -> Result<Self, DataHubError> {
        if hour >= 24 {
            return Err(DataHubError::invalid("hour", format!("{hour} is not in 0..24")));
        }
        if minute >= 60 {
            return Err(DataHubError::invalid(
                "minute",
                format!("{minute} is not in 0..60"),
            ));
        }
        Ok(Self::new(format!("{minute} {hour} * * *"), timezone))
    }
}

/// A page of ingestion sources.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionSourcePage {
    /// Offset of the first source in this page.
    pub start: u32,
    /// Number of sources in this page.
    pub count: u32,
    /// Number of sources on the server.
    pub total: u32,
    #[serde(default)]
    pub ingestion_sources: Vec<IngestionSource>,
}

/// An ingestion source as stored by DataHub.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionSource {
    /// `urn:li:dataHubIngestionSource:<id>`.
    pub urn: String,
    pub name: String,
    /// Source kind, e.g. `mysql`.
    #[serde(rename = "type")]
    pub source_type: String,
    /// `None` for sources that only run on demand.
    #[serde(default)]
    pub schedule: Option<Schedule>,
    #[serde(default)]
    pub platform: Option<PlatformRef>,
    pub config: IngestionConfig,
}

/// The data platform an ingestion source reads from.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PlatformRef {
    pub name: String,
}

/// Execution settings of an ingestion source.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionConfig {
    /// The recipe as a JSON string.
    pub recipe: String,
    /// Executor that runs the source; the server picks one when absent.
    #[serde(default)]
    pub executor_id: Option<String>,
    /// CLI version pinned for the run.
    #[serde(default)]
    pub version: Option<String>,
}

/// Connection details of a SQL database source.
#[derive(Clone, PartialEq, Eq)]
pub struct SqlConnection {
    /// `host:port` of the database server.
    pub host_port: String,
    /// Database to ingest.
    pub database: String,
    pub username: String,
    /// Plain value or secret reference such as `${mysql_password}`.
    pub password: String,
}

impl fmt::Debug for SqlConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlConnection")
            .field("host_port", &self.host_port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"*****")
            .finish()
    }
}

/// Where ingested metadata is written.
#[derive(Clone, PartialEq, Eq)]
pub struct DataHubSink {
    /// GMS base URL, e.g. `http://datahub-gms:8080`.
    pub server: String,
    /// Token the ingestion run authenticates with. Usually a secret
    /// reference such as `${ingestion_token}` rather than a literal.
    pub token: String,
}

impl fmt::Debug for DataHubSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataHubSink")
            .field("server", &self.server)
            .field("token", &"*****")
            .finish()
    }
}

/// Everything needed to create a scheduled SQL database ingestion source.
///
/// The generated recipe enables stateful ingestion with stale-metadata
/// removal, includes tables and views, disables profiling, and adds the
/// given owners (as `PRODUCER`) and tags to every ingested dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SqlIngestion {
    pub name: String,
    /// Source plugin, e.g. `postgres` or `mysql`.
    pub source_type: String,
    pub description: String,
    pub schedule: Schedule,
    /// Executor that runs the source, usually [`DEFAULT_EXECUTOR_ID`].
    pub executor_id: String,
    /// Platform instance (environment label) of the database, e.g. `prod`.
    pub platform_instance: String,
    pub pipeline_name: String,
    pub connection: SqlConnection,
    pub sink: DataHubSink,
    /// Owners added to every ingested dataset.
    pub owner_urns: Vec<String>,
    /// Tags added to every ingested dataset.
    pub tag_urns: Vec<String>,
}

impl SqlIngestion {
    fn validate(&self) -> Result<(), DataHubError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("source_type", &self.source_type)?;
        require_non_empty("schedule.interval", &self.schedule.interval)?;
        require_non_empty("schedule.timezone", &self.schedule.timezone)?;
        require_non_empty("executor_id", &self.executor_id)?;
        require_non_empty("pipeline_name", &self.pipeline_name)?;
        require_non_empty("connection.host_port", &self.connection.host_port)?;
        require_non_empty("connection.database", &self.connection.database)?;
        require_non_empty("connection.username", &self.connection.username)?;
        require_non_empty("sink.server", &self.sink.server)?;
        for urn in &self.owner_urns {
            require_non_empty("owner_urns", urn)?;
        }
        for urn in &self.tag_urns {
            require_non_empty("tag_urns", urn)?;
        }
        Ok(())
    }

    /// Builds the typed recipe for this source.
    #[must_use]
    pub fn recipe(&self) -> Recipe {
        let mut transformers = Vec::new();
        if !self.owner_urns.is_empty() {
            transformers.push(Transformer::SimpleAddDatasetOwnership {
                semantics: Semantics::Patch,
                owner_urns: self.owner_urns.clone(),
                ownership_type: "PRODUCER".to_string(),
            });
        }
        if !self.tag_urns.is_empty() {
            transformers.push(Transformer::SimpleAddDatasetTags {
                semantics: Semantics::Patch,
                tag_urns: self.tag_urns.clone(),
            });
        }

        Recipe {
            source: RecipeSource {
                source_type: self.source_type.clone(),
                config: SqlSourceConfig {
                    stateful_ingestion: StatefulIngestion {
                        enabled: true,
                        remove_stale_metadata: true,
                    },
                    platform_instance: self.platform_instance.clone(),
                    include_tables: true,
                    include_views: true,
                    database: self.connection.database.clone(),
                    host_port: self.connection.host_port.clone(),
                    username: self.connection.username.clone(),
                    password: self.connection.password.clone(),
                    profiling: Profiling { enabled: false },
                },
            },
            pipeline_name: self.pipeline_name.clone(),
            datahub_api: DataHubApi {
                server: self.sink.server.clone(),
            },
            sink: RecipeSink {
                sink_type: DATAHUB_REST_SINK.to_string(),
                config: RecipeSinkConfig {
                    server: self.sink.server.clone(),
                    token: self.sink.token.clone(),
                },
            },
            transformers,
        }
    }
}

/// An ingestion recipe: source, sink and transformers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub source: RecipeSource,
    /// Stable name used to key stateful ingestion.
    pub pipeline_name: String,
    pub datahub_api: DataHubApi,
    pub sink: RecipeSink,
    /// Applied in order to every emitted dataset.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transformers: Vec<Transformer>,
}

impl Recipe {
    /// Encodes the recipe as the JSON string DataHub stores.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] if encoding fails.
    pub fn to_json_string(&self) -> Result<String, DataHubError> {
        serde_json::to_string(self).map_err(|e| DataHubError::invalid("recipe", e.to_string()))
    }
}

/// The `source` block of a recipe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSource {
    /// Source plugin name, e.g. `mysql`.
    #[serde(rename = "type")]
    pub source_type: String,
    pub config: SqlSourceConfig,
}

/// Plugin configuration of a SQL source. `Debug` masks the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlSourceConfig {
    pub stateful_ingestion: StatefulIngestion,
    /// Prefix that keeps URNs of different servers apart.
    pub platform_instance: String,
    pub include_tables: bool,
    pub include_views: bool,
    pub database: String,
    /// `host:port` of the database server.
    pub host_port: String,
    pub username: String,
    pub password: String,
    pub profiling: Profiling,
}

impl fmt::Debug for SqlSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlSourceConfig")
            .field("platform_instance", &self.platform_instance)
            .field("database", &self.database)
            .field("host_port", &self.host_port)
            .field("username", &self.username)
            .field("password", &"*****")
            .finish_non_exhaustive()
    }
}

/// Stateful ingestion settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatefulIngestion {
    pub enabled: bool,
    /// Soft-deletes entities that disappeared since the previous run.
    pub remove_stale_metadata: bool,
}

/// Table profiling settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profiling {
    pub enabled: bool,
}

/// The `datahub_api` block: the server stateful ingestion checkpoints to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataHubApi {
    pub server: String,
}

/// The `sink` block of a recipe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSink {
    /// Sink plugin name, e.g. `datahub-rest`.
    #[serde(rename = "type")]
    pub sink_type: String,
    pub config: RecipeSinkConfig,
}

/// Where a REST sink writes. `Debug` masks the token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSinkConfig {
    /// GMS base URL.
    pub server: String,
    /// Access token sent with every write.
    pub token: String,
}

impl fmt::Debug for RecipeSinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeSinkConfig")
            .field("server", &self.server)
            .field("token", &"*****")
            .finish()
    }
}

/// How a transformer merges with existing metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Semantics {
    /// Keep existing values and add the new ones.
    Patch,
    /// Replace existing values.
    Overwrite,
}

/// A recipe transformer (`{"type": ..., "config": {...}}` on the wire).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "snake_case")]
pub enum Transformer {
    /// Adds owners to every dataset.
    SimpleAddDatasetOwnership {
        semantics: Semantics,
        owner_urns: Vec<String>,
        ownership_type: String,
    },
    /// Adds tags to every dataset.
    SimpleAddDatasetTags {
        semantics: Semantics,
        tag_urns: Vec<String>,
    },
}

/// Full replacement for an existing ingestion source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestionSourceUpdate {
    pub name: String,
    pub source_type: String,
    /// `None` removes the schedule.
    pub schedule: Option<Schedule>,
    pub executor_id: String,
    /// CLI version to pin; `None` lets the server choose.
    pub version: Option<String>,
    /// The complete recipe as a JSON string.
    pub recipe: String,
}

impl<T: GraphqlTransport> DataHubClient<T> {
    /// Lists ingestion sources.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] if `start` or `count`
    /// exceeds `i32::MAX`, and [`DataHubError::RequestFailed`] if the round
    /// trip fails.
    pub async fn list_ingestion_sources(
        &self,
        start: u32,
        count: u32,
    ) -> Result<IngestionSourcePage, DataHubError> {
        require_page_window(start, count)?;
        let request = GraphqlRequest::new(documents::LIST_INGESTION_SOURCES)
            .operation_name("listIngestionSources")
            .variable("input", json!({ "start": start, "count": count }));
        self.fetch(request, "listIngestionSources").await
    }

    /// Creates a scheduled SQL ingestion source and returns its URN.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for a missing name, type,
    /// connection detail or sink server, and [`DataHubError::RequestFailed`]
    /// if the round trip fails.
    pub async fn create_ingestion_source(
        &self,
        ingestion: &SqlIngestion,
    ) -> Result<String, DataHubError> {
        ingestion.validate()?;
        let recipe = ingestion.recipe().to_json_string()?;

        let request = GraphqlRequest::new(documents::CREATE_INGESTION_SOURCE)
            .operation_name("createIngestionSource")
            .variable(
                "input",
                json!({
                    "name": ingestion.name,
                    "type": ingestion.source_type,
                    "description": ingestion.description,
                    "schedule": to_variable("schedule", &ingestion.schedule)?,
                    "config": {
                        "recipe": recipe,
                        "executorId": ingestion.executor_id,
                    },
                }),
            );
        self.fetch(request, "createIngestionSource").await
    }

    /// Replaces an ingestion source's definition and returns its URN.
    ///
    /// # Errors
    ///
    /// Returns [`DataHubError::InvalidArgument`] for an empty URN, name,
    /// type, executor or recipe, and [`DataHubError::RequestFailed`] if the
    /// round trip fails.
    pub async fn update_ingestion_source(
        &self,
        urn: &str,
        update: &IngestionSourceUpdate,
    ) -> Result<String, DataHubError> {
        require_non_empty("urn", urn)?;
        require_non_empty("name", &update.name)?;
        require_non_empty("source_type", &update.source_type)?;
        require_non_empty("executor_id", &update.executor_id)?;
        require_non_empty("recipe", &update.recipe)?;

        let request = GraphqlRequest::new(documents::UPDATE_INGESTION_SOURCE)
            .operation_name("updateIngestionSource")
            .variable("urn", urn)
            .variable(
                "input",
                json!({
                    "name": update.name,
                    "type": update.source_type,
                    "schedule": to_variable("schedule", &update.schedule)?,
                    "config": {
                        "executorId": update.executor_id,
                        "version": update.version,
                        "recipe": update.recipe,
                    },
                }),
            );
        self.fetch(request, "updateIngestionSource").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample_ingestion() -> SqlIngestion {
        SqlIngestion {
            name: "billing-db".to_string(),
            source_type: "postgres".to_string(),
            description: "Billing database".to_string(),
            schedule: Schedule::daily(3, 15, DEFAULT_TIMEZONE).unwrap(),
            executor_id: DEFAULT_EXECUTOR_ID.to_string(),
            platform_instance: "prod".to_string(),
            pipeline_name: "billing-db.internal".to_string(),
            connection: SqlConnection {
                host_port: "billing-db.internal:5432".to_string(),
                database: "billing".to_string(),
                username: "reader".to_string(),
                password: "s3cr3t".to_string(),
            },
            sink: DataHubSink {
                server: "http://datahub-gms:8080".to_string(),
                token: "${ingestion_token}".to_string(),
            },
            owner_urns: vec!["urn:li:corpuser:billing-owner".to_string()],
            tag_urns: vec!["urn:li:tag:billing".to_string()],
        }
    }

    #[test]
    fn test_daily_schedule_interval() {
        let schedule = Schedule::daily(0, 0, "UTC").unwrap();
        assert_eq!(schedule.interval, "0 0 * * *");
        assert_eq!(Schedule::daily(23, 59, "UTC").unwrap().interval, "59 23 * * *");
    }

    #[test]
    fn test_daily_schedule_rejects_out_of_range() {
        assert!(matches!(
            Schedule::daily(24, 0, "UTC"),
            Err(DataHubError::InvalidArgument { argument: "hour", .. })
        ));
        assert!(matches!(
            Schedule::daily(1, 60, "UTC"),
            Err(DataHubError::InvalidArgument { argument: "minute", .. })
        ));
    }

    #[test]
    fn test_recipe_wire_shape() {
        let recipe: Value =
            serde_json::from_str(&sample_ingestion().recipe().to_json_string().unwrap()).unwrap();

        assert_eq!(recipe["source"]["type"], "postgres");
        assert_eq!(recipe["source"]["config"]["stateful_ingestion"]["enabled"], true);
        assert_eq!(recipe["source"]["config"]["profiling"]["enabled"], false);
        assert_eq!(recipe["source"]["config"]["host_port"], "billing-db.internal:5432");
        assert_eq!(recipe["pipeline_name"], "billing-db.internal");
        assert_eq!(recipe["sink"]["type"], "datahub-rest");
        assert_eq!(recipe["sink"]["config"]["token"], "${ingestion_token}");
        assert_eq!(recipe["datahub_api"]["server"], "http://datahub-gms:8080");

        let transformers = recipe["transformers"].as_array().unwrap();
        assert_eq!(transformers.len(), 2);
        assert_eq!(transformers[0]["type"], "simple_add_dataset_ownership");
        assert_eq!(transformers[0]["config"]["semantics"], "PATCH");
        assert_eq!(transformers[0]["config"]["ownership_type"], "PRODUCER");
        assert_eq!(transformers[1]["type"], "simple_add_dataset_tags");
        assert_eq!(
            transformers[1]["config"]["tag_urns"],
            serde_json::json!(["urn:li:tag:billing"])
        );
    }

    #[test]
    fn test_recipe_omits_transformers_without_owners_or_tags() {
        let mut ingestion = sample_ingestion();
        ingestion.owner_urns.clear();
        ingestion.tag_urns.clear();

        let recipe: Value =
            serde_json::from_str(&ingestion.recipe().to_json_string().unwrap()).unwrap();
        assert!(recipe.get("transformers").is_none());
    }

    #[test]
    fn test_recipe_round_trips_hostile_password() {
        let mut ingestion = sample_ingestion();
        ingestion.connection.password = r#"p"a\ss{}"word"#.to_string();

        let encoded = ingestion.recipe().to_json_string().unwrap();
        let decoded: Recipe = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.source.config.password, r#"p"a\ss{}"word"#);
    }

    #[test]
    fn test_validate_requires_connection_details() {
        let mut ingestion = sample_ingestion();
        ingestion.connection.database = String::new();
        assert!(matches!(
            ingestion.validate(),
            Err(DataHubError::InvalidArgument {
                argument: "connection.database",
                ..
            })
        ));
    }

    #[test]
    fn test_debug_masks_credentials() {
        let ingestion = sample_ingestion();
        let debug_str = format!("{:?} {:?}", ingestion, ingestion.recipe());
        assert!(!debug_str.contains("s3cr3t"));
        assert!(!debug_str.contains("${ingestion_token}"));
    }

    #[test]
    fn test_ingestion_source_decodes_without_schedule() {
        let source: IngestionSource = serde_json::from_value(serde_json::json!({
            "urn": "urn:li:dataHubIngestionSource:abc",
            "name": "manual-run",
            "type": "mysql",
            "schedule": null,
            "platform": null,
            "config": { "version": null, "executorId": "default", "recipe": "{}" }
        }))
        .unwrap();

        assert!(source.schedule.is_none());
        assert_eq!(source.config.executor_id.as_deref(), Some("default"));
    }
}
