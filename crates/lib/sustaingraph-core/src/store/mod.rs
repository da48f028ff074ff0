//! Graph store interface and Neo4j implementation.
//!
//! The store layer is the only place that talks to the graph database. The
//! loader and query tools hand it Cypher text plus parameters and get rows back
//! as JSON maps.

pub mod cypher;
pub mod neo4j;

use std::{error::Error, fmt};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub use neo4j::{Neo4jGraphStore, Neo4jSettings};

/// Named parameters bound to a Cypher statement.
pub type QueryParams = Map<String, Value>;
/// A single result row keyed by the `RETURN` aliases.
pub type Row = Map<String, Value>;

#[derive(Debug)]
pub enum StoreError {
    Neo4j(Box<neo4rs::Error>),
    Decode(String),
    InvalidInput(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neo4j(err) => write!(f, "Neo4j error: {err}"),
            Self::Decode(message) => write!(f, "Row decode error: {message}"),
            Self::InvalidInput(message) => write!(f, "Invalid input: {message}"),
        }
    }
}

impl Error for StoreError {}

impl From<neo4rs::Error> for StoreError {
    fn from(err: neo4rs::Error) -> Self {
        Self::Neo4j(Box::new(err))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Transactional property-graph store addressed with Cypher.
#[async_trait]
pub trait GraphStore: Send + Sync + 'static {
    /// Runs a read query and collects every row.
    async fn run_query(&self, query: &str, params: QueryParams) -> StoreResult<Vec<Row>>;

    /// Runs a write statement inside its own transaction and commits it.
    async fn run_transaction(&self, query: &str, params: QueryParams) -> StoreResult<()>;
}

/// Decodes JSON rows into typed records.
///
/// # Errors
/// Returns `StoreError::Decode` if a row does not match `T`.
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> StoreResult<Vec<T>> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(Value::Object(row))
                .map_err(|err| StoreError::Decode(err.to_string()))
        })
        .collect()
}

/// Serializes a value into a parameter entry.
///
/// # Errors
/// Returns `StoreError::InvalidInput` if the value cannot be represented as JSON.
pub fn bind<T: serde::Serialize>(
    mut params: QueryParams,
    key: &str,
    value: T,
) -> StoreResult<QueryParams> {
    let value = serde_json::to_value(value).map_err(|err| {
        StoreError::InvalidInput(format!("cannot bind parameter {key}: {err}"))
    })?;
    params.insert(key.to_string(), value);
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Point {
        time: String,
        value: f64,
    }

    #[test]
    fn decode_rows_maps_aliases_to_fields() {
        let row = json!({"time": "2015-01-01", "value": 1.5});
        let Value::Object(row) = row else {
            panic!("expected object");
        };
        let points: Vec<Point> = decode_rows(vec![row]).expect("rows should decode");
        assert_eq!(
            points,
            vec![Point {
                time: "2015-01-01".to_string(),
                value: 1.5
            }]
        );
    }

    #[test]
    fn decode_rows_reports_shape_mismatch() {
        let Value::Object(row) = json!({"time": 2015}) else {
            panic!("expected object");
        };
        let err = decode_rows::<Point>(vec![row]).expect_err("decode should fail");
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[test]
    fn bind_inserts_serialized_value() {
        let params = bind(QueryParams::new(), "geo_id", "EL30").expect("bind should succeed");
        assert_eq!(params.get("geo_id"), Some(&json!("EL30")));
    }
}
