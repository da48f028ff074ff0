#![allow(dead_code)]

use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};
use sustaingraph_core::provider::TsvDirectoryProvider;
use sustaingraph_core::store::{GraphStore, QueryParams, Row, StoreError, StoreResult, cypher};
use sustaingraph_store::{ObservationKey, ObservationParams};

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
}

pub fn fixture_provider() -> TsvDirectoryProvider {
    TsvDirectoryProvider::new(data_dir())
}

#[derive(Debug, Clone)]
pub struct Transaction {
    pub query: String,
    pub params: QueryParams,
}

impl Transaction {
    pub fn is_observation_batch(&self) -> bool {
        self.query.starts_with("UNWIND $parameters")
    }

    pub fn batch_len(&self) -> usize {
        self.params
            .get("parameters")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

#[derive(Default)]
struct State {
    transactions: Vec<Transaction>,
    series_metadata: BTreeSet<(String, String, String)>,
    observations: BTreeSet<ObservationKey>,
}

/// In-memory `GraphStore` that records every write and applies MERGE
/// semantics to series metadata and observations.
pub struct RecordingStore {
    eu_areas: Vec<String>,
    iso_areas: Vec<String>,
    fail_on_transaction: Option<usize>,
    state: Mutex<State>,
}

impl RecordingStore {
    pub fn new(eu_areas: &[&str], iso_areas: &[&str]) -> Self {
        Self {
            eu_areas: eu_areas.iter().map(ToString::to_string).collect(),
            iso_areas: iso_areas.iter().map(ToString::to_string).collect(),
            fail_on_transaction: None,
            state: Mutex::new(State::default()),
        }
    }

    /// Fails the n-th (1-based) write transaction.
    #[must_use]
    pub fn failing_on(mut self, transaction: usize) -> Self {
        self.fail_on_transaction = Some(transaction);
        self
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.lock().expect("state lock").transactions.clone()
    }

    pub fn observation_keys(&self) -> BTreeSet<ObservationKey> {
        self.state.lock().expect("state lock").observations.clone()
    }

    pub fn series_metadata(&self) -> BTreeSet<(String, String, String)> {
        self.state.lock().expect("state lock").series_metadata.clone()
    }

    fn known(&self, property_query: &str) -> HashSet<&str> {
        let areas = if property_query.contains("ga.ISOalpha3code") {
            &self.iso_areas
        } else {
            &self.eu_areas
        };
        areas.iter().map(String::as_str).collect()
    }
}

fn string_param(params: &QueryParams, key: &str) -> String {
    params
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl GraphStore for RecordingStore {
    async fn run_query(&self, query: &str, _params: QueryParams) -> StoreResult<Vec<Row>> {
        let codes = if query == cypher::KNOWN_EU_AREAS {
            &self.eu_areas
        } else if query == cypher::KNOWN_ISO_AREAS || query == cypher::KNOWN_EUROPEAN_COUNTRIES {
            &self.iso_areas
        } else {
            return Ok(Vec::new());
        };
        let Value::Object(row) = json!({ "codes": codes }) else {
            return Ok(Vec::new());
        };
        Ok(vec![row])
    }

    async fn run_transaction(&self, query: &str, params: QueryParams) -> StoreResult<()> {
        let mut state = self.state.lock().expect("state lock");
        if self.fail_on_transaction == Some(state.transactions.len() + 1) {
            return Err(StoreError::Decode("simulated transaction failure".to_string()));
        }
        state.transactions.push(Transaction {
            query: query.to_string(),
            params: params.clone(),
        });

        if query == cypher::SERIES_METADATA_UPSERT || query == cypher::HAPPINESS_SERIES_UPSERT {
            state.series_metadata.insert((
                string_param(&params, "s_code"),
                string_param(&params, "d_code"),
                string_param(&params, "att_code"),
            ));
            return Ok(());
        }

        if query.starts_with("UNWIND $parameters") {
            let rows: Vec<ObservationParams> = params
                .get("parameters")
                .cloned()
                .map(serde_json::from_value)
                .transpose()
                .map_err(|err| StoreError::Decode(err.to_string()))?
                .unwrap_or_default();
            let known = self.known(query);
            for row in rows {
                let metadata = (row.code.clone(), row.dim.clone(), row.att.clone());
                if known.contains(row.geo.as_str()) && state.series_metadata.contains(&metadata) {
                    state.observations.insert(row.key());
                }
            }
        }
        Ok(())
    }
}
