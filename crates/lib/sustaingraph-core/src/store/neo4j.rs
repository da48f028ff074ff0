use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use neo4rs::{BoltType, ConfigBuilder, Graph, Query, query};
use tracing::{debug, warn};

use super::{GraphStore, QueryParams, Row, StoreError, StoreResult};

/// Connection settings for a Neo4j server.
#[derive(Debug, Clone)]
pub struct Neo4jSettings {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: Option<String>,
    pub max_connections: Option<usize>,
}

impl Neo4jSettings {
    pub fn new(
        uri: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            user: user.into(),
            password: password.into(),
            database: None,
            max_connections: None,
        }
    }

    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = Some(max_connections);
        self
    }
}

/// `GraphStore` backed by a pooled neo4rs client.
pub struct Neo4jGraphStore {
    graph: Arc<Graph>,
}

impl Clone for Neo4jGraphStore {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
        }
    }
}

impl Neo4jGraphStore {
    #[must_use]
    pub fn new(graph: Graph) -> Self {
        Self {
            graph: Arc::new(graph),
        }
    }

    #[must_use]
    pub const fn from_arc(graph: Arc<Graph>) -> Self {
        Self { graph }
    }

    /// Opens a connection pool using the provided settings.
    ///
    /// # Errors
    /// Returns `StoreError` if the settings are invalid or the server is unreachable.
    pub async fn connect(settings: &Neo4jSettings) -> StoreResult<Self> {
        ensure_non_empty(&settings.uri, "uri")?;
        let mut builder = ConfigBuilder::default()
            .uri(settings.uri.as_str())
            .user(settings.user.as_str())
            .password(settings.password.as_str());
        if let Some(database) = settings.database.as_deref() {
            builder = builder.db(database);
        }
        if let Some(max_connections) = settings.max_connections {
            builder = builder.max_connections(max_connections);
        }
        let graph = Graph::connect(builder.build()?).await?;
        Ok(Self::new(graph))
    }

    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}

#[async_trait]
impl GraphStore for Neo4jGraphStore {
    async fn run_query(&self, cypher: &str, params: QueryParams) -> StoreResult<Vec<Row>> {
        let statement = build_query(cypher, params)?;
        let mut stream = self.graph.execute(statement).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            let decoded: Row = row
                .to()
                .map_err(|err| StoreError::Decode(err.to_string()))?;
            rows.push(decoded);
        }
        debug!(rows = rows.len(), "read query completed");
        Ok(rows)
    }

    async fn run_transaction(&self, cypher: &str, params: QueryParams) -> StoreResult<()> {
        let statement = build_query(cypher, params)?;
        let mut txn = self.graph.start_txn().await?;
        if let Err(err) = txn.run(statement).await {
            let rollback = txn.rollback().await;
            return Err(after_rollback(err, rollback).into());
        }
        txn.commit().await?;
        Ok(())
    }
}

fn build_query(cypher: &str, params: QueryParams) -> StoreResult<Query> {
    let mut statement = query(cypher);
    for (key, value) in params {
        let bolt = BoltType::try_from(value).map_err(|err| {
            StoreError::InvalidInput(format!("parameter {key} cannot be sent to Neo4j: {err}"))
        })?;
        statement = statement.param(&key, bolt);
    }
    Ok(statement)
}

/// Returns the statement error, logging a rollback that failed as well.
fn after_rollback<E, R: fmt::Display>(err: E, rollback: Result<(), R>) -> E {
    if let Err(rollback_err) = rollback {
        warn!(error = %rollback_err, "rollback failed");
    }
    err
}

fn ensure_non_empty(value: &str, field: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn settings_builder_keeps_database() {
        let settings = Neo4jSettings::new("bolt://localhost:7687", "neo4j", "secret")
            .with_database("sustaingraph")
            .with_max_connections(4);
        assert_eq!(settings.database.as_deref(), Some("sustaingraph"));
        assert_eq!(settings.max_connections, Some(4));
    }

    #[test]
    fn build_query_accepts_nested_batches() {
        let mut params = QueryParams::new();
        params.insert(
            "parameters".to_string(),
            json!([{"geo": "EL30", "year": "2015", "value": 1.5}]),
        );
        assert!(build_query("UNWIND $parameters AS row RETURN row", params).is_ok());
    }

    #[test]
    fn failed_rollback_keeps_the_statement_error() {
        let err = after_rollback("constraint violated", Err::<(), _>("connection reset"));
        assert_eq!(err, "constraint violated");
        let err = after_rollback("constraint violated", Ok::<(), String>(()));
        assert_eq!(err, "constraint violated");
    }

    #[tokio::test]
    async fn connect_rejects_empty_uri() {
        let settings = Neo4jSettings::new("  ", "neo4j", "secret");
        let err = Neo4jGraphStore::connect(&settings)
            .await
            .err()
            .expect("empty uri should be rejected");
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }
}
