//! Neo4j graph store over the HTTP Cypher endpoint.
//!
//! Each call commits one single-statement transaction through
//! `POST {base_url}/db/{database}/tx/commit`. Authentication uses HTTP
//! Basic credentials set as a default header on the client.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, trace};

use crate::domain::{
    Endpoint, Line, Link, LinkKind, Snap, Station, StationKey, StationName, Stop,
};

use super::GraphStore;
use super::error::GraphError;
use super::queries;
use super::types::{Statement, TxRequest, TxResponse};

/// Default base URL of a local Neo4j server.
const DEFAULT_BASE_URL: &str = "http://localhost:7474";

/// Default database name.
const DEFAULT_DATABASE: &str = "neo4j";

/// Default number of rows sent per bulk insert statement.
const DEFAULT_BATCH_SIZE: usize = 500;

/// Configuration for the Neo4j client.
#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    /// Base URL of the HTTP API (defaults to a local server)
    pub base_url: String,
    /// Database name
    pub database: String,
    /// User name for Basic authentication
    pub user: String,
    /// Password for Basic authentication
    pub password: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Rows per bulk insert statement
    pub batch_size: usize,
}

impl Neo4jConfig {
    /// Create a new config with the given credentials.
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            user: user.into(),
            password: password.into(),
            timeout_secs: 30,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the database name.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the bulk insert batch size. Zero is treated as one.
    pub fn with_batch_size(mut self, rows: usize) -> Self {
        self.batch_size = rows.max(1);
        self
    }

    /// URL of the auto-commit transaction endpoint.
    pub fn commit_url(&self) -> String {
        format!(
            "{}/db/{}/tx/commit",
            self.base_url.trim_end_matches('/'),
            self.database
        )
    }
}

/// Neo4j HTTP API client.
#[derive(Debug, Clone)]
pub struct Neo4jClient {
    http: reqwest::Client,
    commit_url: String,
    batch_size: usize,
}

impl Neo4jClient {
    /// Create a new client with the given configuration.
    pub fn new(config: Neo4jConfig) -> Result<Self, GraphError> {
        let mut headers = HeaderMap::new();

        let credentials = BASE64.encode(format!("{}:{}", config.user, config.password));
        let auth = HeaderValue::from_str(&format!("Basic {credentials}")).map_err(|_| {
            GraphError::Api {
                status: 0,
                message: "Invalid credentials format".to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            commit_url: config.commit_url(),
            batch_size: config.batch_size.max(1),
        })
    }

    /// Run one statement and return the rows of its result.
    async fn run(&self, statement: &str, parameters: Value) -> Result<Vec<Vec<Value>>, GraphError> {
        trace!(%statement, %parameters, "running cypher statement");

        let request = TxRequest {
            statements: vec![Statement {
                statement,
                parameters,
            }],
        };

        let response = self.http.post(&self.commit_url).json(&request).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(GraphError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let tx: TxResponse = serde_json::from_str(&body).map_err(|e| GraphError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        if let Some(error) = tx.errors.into_iter().next() {
            return Err(GraphError::Query {
                code: error.code,
                message: error.message,
            });
        }

        Ok(tx
            .results
            .into_iter()
            .next()
            .map(|result| result.data.into_iter().map(|d| d.row).collect())
            .unwrap_or_default())
    }

    /// Run a bulk statement once per batch of `rows`, summing the counts
    /// each batch returns.
    async fn run_batched(&self, statement: &str, rows: Vec<Value>) -> Result<usize, GraphError> {
        let mut total = 0;
        for batch in rows.chunks(self.batch_size) {
            let result = self.run(statement, json!({ "rows": batch })).await?;
            let (count,): (usize,) = first_row(result)?.unwrap_or((0,));
            total += count;
        }
        Ok(total)
    }
}

impl GraphStore for Neo4jClient {
    async fn upsert_endpoint(&self, endpoint: &Endpoint) -> Result<(), GraphError> {
        debug!(key = %endpoint.key(), location = %endpoint.location, "upserting endpoint");
        self.run(
            queries::UPSERT_ENDPOINT,
            json!({
                "name": endpoint.key(),
                "display_name": endpoint.role.to_string(),
                "x": endpoint.location.x(),
                "y": endpoint.location.y(),
            }),
        )
        .await?;
        Ok(())
    }

    async fn nearest_station(&self, endpoint: &Endpoint) -> Result<Option<Snap>, GraphError> {
        let rows = self
            .run(queries::NEAREST_STATION, json!({ "name": endpoint.key() }))
            .await?;

        let row: Option<(String, String, String, f64)> = first_row(rows)?;
        row.map(|(name, display_name, line, distance)| {
            Ok(Snap {
                stop: stop_from_parts(&name, display_name, &line)?,
                distance,
            })
        })
        .transpose()
    }

    async fn shortest_path(
        &self,
        from: &StationKey,
        to: &StationKey,
        kinds: &[LinkKind],
    ) -> Result<Option<Vec<Stop>>, GraphError> {
        // shortestPath needs distinct end nodes
        if from == to {
            let rows = self
                .run(
                    queries::STATION_STOP,
                    json!({ "name": from.name.as_str(), "line": from.line.as_str() }),
                )
                .await?;
            return Ok(rows_to_stops(rows)?.filter(|stops| !stops.is_empty()));
        }

        if kinds.is_empty() {
            return Ok(None);
        }

        let rows = self
            .run(
                &queries::shortest_path(kinds),
                json!({
                    "from_name": from.name.as_str(),
                    "from_line": from.line.as_str(),
                    "to_name": to.name.as_str(),
                    "to_line": to.line.as_str(),
                }),
            )
            .await?;

        Ok(rows_to_stops(rows)?.filter(|stops| !stops.is_empty()))
    }

    async fn distance(&self, a: &StationKey, b: &StationKey) -> Result<Option<f64>, GraphError> {
        let rows = self
            .run(
                queries::DISTANCE,
                json!({
                    "a_name": a.name.as_str(),
                    "a_line": a.line.as_str(),
                    "b_name": b.name.as_str(),
                    "b_line": b.line.as_str(),
                }),
            )
            .await?;

        let row: Option<(f64,)> = first_row(rows)?;
        Ok(row.map(|(d,)| d))
    }

    async fn delete_endpoint(&self, endpoint: &Endpoint) -> Result<(), GraphError> {
        debug!(key = %endpoint.key(), "deleting endpoint");
        self.run(queries::DELETE_ENDPOINT, json!({ "name": endpoint.key() }))
            .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), GraphError> {
        self.run(queries::CLEAR, json!({})).await?;
        // Schema changes cannot share a transaction with writes
        self.run(queries::CREATE_STATION_INDEX, json!({})).await?;
        Ok(())
    }

    async fn insert_stations(&self, stations: &[Station]) -> Result<usize, GraphError> {
        let rows = stations
            .iter()
            .map(|s| {
                json!({
                    "display_name": s.display_name,
                    "name": s.key.name.as_str(),
                    "line": s.key.line.as_str(),
                    "x": s.location.x(),
                    "y": s.location.y(),
                    "ridership": s.ridership,
                    "city": s.city,
                })
            })
            .collect();

        self.run_batched(queries::INSERT_STATIONS, rows).await
    }

    async fn insert_links(&self, links: &[Link]) -> Result<usize, GraphError> {
        let mut by_kind: BTreeMap<LinkKind, Vec<Value>> = BTreeMap::new();
        for link in links {
            by_kind.entry(link.kind).or_default().push(json!({
                "from_name": link.from.name.as_str(),
                "from_line": link.from.line.as_str(),
                "to_name": link.to.name.as_str(),
                "to_line": link.to.line.as_str(),
                "line": link.line.as_ref().map(Line::as_str),
            }));
        }

        let mut total = 0;
        for (kind, rows) in by_kind {
            debug!(%kind, count = rows.len(), "inserting links");
            total += self.run_batched(&queries::insert_links(kind), rows).await?;
        }
        Ok(total)
    }
}

/// Decode the first row, if any, into `T`.
fn first_row<T: DeserializeOwned>(rows: Vec<Vec<Value>>) -> Result<Option<T>, GraphError> {
    rows.into_iter().next().map(decode_row).transpose()
}

/// Decode a positional row into a tuple type.
fn decode_row<T: DeserializeOwned>(row: Vec<Value>) -> Result<T, GraphError> {
    let value = Value::Array(row);
    serde_json::from_value(value.clone())
        .map_err(|e| GraphError::UnexpectedRow(format!("{e}: {value}")))
}

/// Decode `(name, display_name, line)` rows into stops.
///
/// Returns `None` when there are no rows.
fn rows_to_stops(rows: Vec<Vec<Value>>) -> Result<Option<Vec<Stop>>, GraphError> {
    if rows.is_empty() {
        return Ok(None);
    }

    rows.into_iter()
        .map(|row| {
            let (name, display_name, line): (String, String, String) = decode_row(row)?;
            stop_from_parts(&name, display_name, &line)
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn stop_from_parts(name: &str, display_name: String, line: &str) -> Result<Stop, GraphError> {
    let name = StationName::normalize(name)
        .map_err(|e| GraphError::UnexpectedRow(format!("station {display_name:?}: {e}")))?;
    let line = Line::parse(line)
        .map_err(|e| GraphError::UnexpectedRow(format!("station {display_name:?}: {e}")))?;
    Ok(Stop {
        name,
        display_name,
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = Neo4jConfig::new("neo4j", "secret")
            .with_base_url("http://graph:7474/")
            .with_database("metro")
            .with_timeout(60)
            .with_batch_size(100);

        assert_eq!(config.user, "neo4j");
        assert_eq!(config.password, "secret");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.commit_url(), "http://graph:7474/db/metro/tx/commit");
    }

    #[test]
    fn config_defaults() {
        let config = Neo4jConfig::new("neo4j", "neo4j");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.database, DEFAULT_DATABASE);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.commit_url(), "http://localhost:7474/db/neo4j/tx/commit");
    }

    #[test]
    fn zero_batch_size_is_clamped() {
        let config = Neo4jConfig::new("neo4j", "neo4j").with_batch_size(0);
        assert_eq!(config.batch_size, 1);
    }

    #[test]
    fn client_creation() {
        let client = Neo4jClient::new(Neo4jConfig::new("neo4j", "neo4j"));
        assert!(client.is_ok());
    }

    #[test]
    fn decode_path_rows() {
        let rows = vec![
            vec![json!("NATION"), json!("Nation"), json!("1")],
            vec![json!("NATION"), json!("Nation"), json!("2")],
        ];
        let stops = rows_to_stops(rows).unwrap().unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].display_name, "Nation");
        assert_eq!(stops[1].line.as_str(), "2");
    }

    #[test]
    fn decode_empty_path_is_none() {
        assert!(rows_to_stops(Vec::new()).unwrap().is_none());
    }

    #[test]
    fn decode_rejects_malformed_row() {
        let rows = vec![vec![json!("NATION"), json!(null), json!("1")]];
        assert!(matches!(
            rows_to_stops(rows),
            Err(GraphError::UnexpectedRow(_))
        ));
    }

    #[test]
    fn first_row_decodes_tuple() {
        let rows = vec![vec![json!(42)]];
        let row: Option<(usize,)> = first_row(rows).unwrap();
        assert_eq!(row, Some((42,)));

        let none: Option<(usize,)> = first_row(Vec::new()).unwrap();
        assert!(none.is_none());
    }
}
