//! Neo4jHttpStore - GraphStore over Neo4j's HTTP transactional endpoint
//!
//! Each `run_query` posts a single statement to
//! `{uri}/db/{database}/tx/commit`, which opens, executes and commits a
//! transaction in one round trip. Nothing is held open between calls: the
//! pooled `reqwest::Client` owns connections and the server releases the
//! transaction when the request ends, whatever the outcome.
//!
//! # Examples
//!
//! ```rust,no_run
//! use graphdesk_core::db::{GraphStore, Neo4jConfig, Neo4jHttpStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Neo4jHttpStore::new(Neo4jConfig::default())?;
//!     store.verify_connectivity().await?;
//!     Ok(())
//! }
//! ```

use super::{cypher, CypherQuery, DatabaseError, GraphStore, Record};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Connection settings for a Neo4j server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neo4jConfig {
    /// Base HTTP URI, e.g. `http://localhost:7474`
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub timeout: Duration,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: "http://localhost:7474".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            database: "neo4j".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Neo4jConfig {
    pub fn commit_endpoint(&self) -> String {
        let uri = self.uri.trim_end_matches('/');
        format!("{uri}/db/{}/tx/commit", self.database)
    }
}

#[derive(Debug, Serialize)]
struct StatementsRequest<'a> {
    statements: [&'a CypherQuery; 1],
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    #[serde(default)]
    results: Vec<StatementResult>,
    #[serde(default)]
    errors: Vec<Neo4jError>,
}

#[derive(Debug, Deserialize)]
struct StatementResult {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<ResultRow>,
}

#[derive(Debug, Deserialize)]
struct ResultRow {
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Neo4jError {
    code: String,
    message: String,
}

impl From<Neo4jError> for DatabaseError {
    fn from(err: Neo4jError) -> Self {
        // Neo.TransientError.* is Neo4j's retry-safe class
        if err.code.starts_with("Neo.TransientError.") {
            DatabaseError::unavailable(format!("{}: {}", err.code, err.message))
        } else {
            DatabaseError::query(err.code, err.message)
        }
    }
}

/// GraphStore backed by a Neo4j server
#[derive(Debug, Clone)]
pub struct Neo4jHttpStore {
    client: reqwest::Client,
    config: Neo4jConfig,
    endpoint: String,
}

impl Neo4jHttpStore {
    /// Build the store and its connection pool; no request is sent yet
    pub fn new(config: Neo4jConfig) -> Result<Self, DatabaseError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        let endpoint = config.commit_endpoint();

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    pub fn config(&self) -> &Neo4jConfig {
        &self.config
    }

    /// Round-trip a trivial statement to confirm credentials and reachability
    pub async fn verify_connectivity(&self) -> Result<(), DatabaseError> {
        self.run_query(cypher::ping()).await.map(|_| ())
    }

    fn decode(response: CommitResponse) -> Result<Vec<Record>, DatabaseError> {
        if let Some(err) = response.errors.into_iter().next() {
            return Err(err.into());
        }

        let Some(result) = response.results.into_iter().next() else {
            return Ok(Vec::new());
        };

        result
            .data
            .into_iter()
            .map(|row| Record::from_row(&result.columns, row.row))
            .collect()
    }
}

#[async_trait]
impl GraphStore for Neo4jHttpStore {
    async fn run_query(&self, query: CypherQuery) -> Result<Vec<Record>, DatabaseError> {
        tracing::debug!(statement = %query.text, "Running Cypher statement");

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.config.user, Some(&self.config.password))
            .json(&StatementsRequest {
                statements: [&query],
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            let message = format!("Neo4j responded with {status}");
            return Err(DatabaseError::unavailable(message));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(DatabaseError::query(
                "Neo.ClientError.Security.Unauthorized",
                format!("Neo4j rejected credentials for user '{}'", self.config.user),
            ));
        }

        let body: CommitResponse = response.json().await?;
        let records = Self::decode(body)?;
        tracing::debug!(rows = records.len(), "Cypher statement completed");
        Ok(records)
    }
}
