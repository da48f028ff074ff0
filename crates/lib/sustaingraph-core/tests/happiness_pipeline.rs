mod common;

use std::collections::{BTreeMap, HashSet};

use calamine::Data;
use common::RecordingStore;
use sustaingraph_core::control::happiness::{happiness_table, preprocess_happiness};
use sustaingraph_core::control::{ControlError, HappinessIngestRequest, SdgControlPlane};
use sustaingraph_core::store::cypher;

fn headers() -> Vec<String> {
    ["Country name", "Happiness score", "Explained by: Social support"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn sheet_rows() -> Vec<Vec<Data>> {
    vec![
        vec![
            Data::String("Greece".to_string()),
            Data::Float(5.9),
            Data::Float(0.8),
        ],
        vec![
            Data::String("Russia*".to_string()),
            Data::Float(5.6),
            Data::Float(1.1),
        ],
        vec![
            Data::String("North Cyprus*".to_string()),
            Data::Float(6.1),
            Data::Float(1.0),
        ],
        vec![
            Data::String("Japan".to_string()),
            Data::Float(6.1),
            Data::Float(1.2),
        ],
    ]
}

#[tokio::test]
async fn happiness_series_load_under_one_indicator() {
    let control = SdgControlPlane::new(RecordingStore::new(&[], &["GRC", "RUS"]));
    let table = happiness_table(&headers(), sheet_rows()).expect("table should build");
    let known: HashSet<String> = ["GRC", "RUS"].iter().map(ToString::to_string).collect();
    let (rows, report) = preprocess_happiness(&table, &known);
    assert_eq!(report.unresolved_countries, vec!["North Cyprus"]);
    assert_eq!(rows.len(), 2);

    let mut codes = BTreeMap::new();
    codes.insert(
        "Explained by: Social support".to_string(),
        "happiness_social_support".to_string(),
    );
    let loads = control
        .load_happiness(&table.series_columns, &rows, "2022", &codes, 1)
        .await
        .expect("load should succeed");

    let series: Vec<&str> = loads.iter().map(|load| load.series_code.as_str()).collect();
    assert_eq!(series, vec!["happiness_score", "happiness_social_support"]);
    assert!(loads.iter().all(|load| load.observations == 2 && load.batches.len() == 2));

    let transactions = control.store().transactions();
    let upserts: Vec<_> = transactions
        .iter()
        .filter(|txn| txn.query == cypher::HAPPINESS_SERIES_UPSERT)
        .collect();
    assert_eq!(upserts.len(), 2);
    assert_eq!(upserts[0].params["ind_code"], "happiness_score");
    assert_eq!(upserts[1].params["s_desc"], "Explained by: Social support");

    let keys = control.store().observation_keys();
    assert_eq!(keys.len(), 4);
    assert!(keys.iter().all(|key| key.time == "2022"
        && key.attributes_code == "CLS"
        && key.dimensions_code == "A"));
    let geos: HashSet<&str> = keys.iter().map(|key| key.geo_code.as_str()).collect();
    assert_eq!(geos, HashSet::from(["GRC", "RUS"]));
}

#[tokio::test]
async fn observation_batches_match_areas_by_iso_code() {
    let control = SdgControlPlane::new(RecordingStore::new(&[], &["GRC"]));
    let table = happiness_table(&headers(), sheet_rows()).expect("table should build");
    let known: HashSet<String> = HashSet::from(["GRC".to_string()]);
    let (rows, _) = preprocess_happiness(&table, &known);
    control
        .load_happiness(&table.series_columns, &rows, "2022", &BTreeMap::new(), 100)
        .await
        .expect("load should succeed");

    assert!(control
        .store()
        .transactions()
        .iter()
        .filter(|txn| txn.is_observation_batch())
        .all(|txn| txn.query.contains("ga.ISOalpha3code")));
}

#[tokio::test]
async fn missing_workbook_is_a_workbook_error() {
    let control = SdgControlPlane::new(RecordingStore::new(&[], &["GRC"]));
    let dir = tempfile::tempdir().expect("tempdir");
    let err = control
        .ingest_happiness(HappinessIngestRequest {
            workbook: dir.path().join("absent.xlsx"),
            sheet: None,
            year: "2022".to_string(),
            series_codes: BTreeMap::new(),
            batch_size: 100,
        })
        .await
        .expect_err("missing workbook should fail");
    assert!(matches!(err, ControlError::Workbook(_)));
    assert!(control.store().transactions().is_empty());
}

#[tokio::test]
async fn non_numeric_year_is_rejected() {
    let control = SdgControlPlane::new(RecordingStore::new(&[], &[]));
    let err = control
        .ingest_happiness(HappinessIngestRequest {
            workbook: common::data_dir().join("absent.xlsx"),
            sheet: None,
            year: "twenty".to_string(),
            series_codes: BTreeMap::new(),
            batch_size: 100,
        })
        .await
        .expect_err("bad year should fail");
    assert!(matches!(err, ControlError::InvalidInput(_)));
}
