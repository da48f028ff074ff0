mod common;

use common::{RecordingStore, fixture_provider};
use sustaingraph_core::control::{ControlError, IndicatorIngestRequest, SdgControlPlane};
use sustaingraph_core::provider::FilterParams;
use sustaingraph_core::store::cypher;
use sustaingraph_store::{GeoCodeKind, LongRow};

const INDICATOR: &str = "sdg_07_40";

fn request(code: &str, subnational: bool, batch_size: usize) -> IndicatorIngestRequest {
    IndicatorIngestRequest {
        code: code.to_string(),
        filters: FilterParams::new(),
        subnational,
        batch_size,
        geo_kind: GeoCodeKind::EuCode,
    }
}

fn control() -> SdgControlPlane<RecordingStore> {
    SdgControlPlane::new(RecordingStore::new(&["EL", "EL30", "EL41"], &["GRC"]))
}

fn long_rows(count: usize) -> Vec<LongRow> {
    (0..count)
        .map(|index| LongRow {
            geo: "EL30".to_string(),
            time: (2000 + index).to_string(),
            value: 1.0,
            dim_codes: "A".to_string(),
            dim_desc: "Annual".to_string(),
            att_codes: "PC".to_string(),
            att_desc: "Percentage".to_string(),
        })
        .collect()
}

#[tokio::test]
async fn ingest_loads_only_known_subnational_areas() {
    let control = control();
    let report = control
        .ingest_indicator(&fixture_provider(), request(INDICATOR, true, 3))
        .await
        .expect("ingest should succeed");

    assert!(report.applicable);
    assert_eq!(report.known_areas, 3);
    let reshape = report.reshape.expect("reshape report");
    assert_eq!(reshape.subnational_filtered_rows, 1);
    assert_eq!(reshape.unpivoted_rows, 12);
    assert_eq!(reshape.dropped_missing_value, 1);
    assert_eq!(reshape.dropped_unknown_area, 3);
    assert!(reshape.unknown_areas.contains("XX99"));
    assert!(reshape.unresolved_descriptions.is_empty());

    let load = report.load.expect("load report");
    assert_eq!(load.series_metadata_count, 2);
    assert_eq!(load.observation_count, 8);
    let sizes: Vec<usize> = load.batches.iter().map(|batch| batch.rows).collect();
    assert_eq!(sizes, vec![3, 3, 2]);

    let keys = control.store().observation_keys();
    assert_eq!(keys.len(), 8);
    assert!(keys.iter().all(|key| key.geo_code == "EL30" || key.geo_code == "EL41"));
    assert!(keys.iter().all(|key| key.series_code == INDICATOR));
}

#[tokio::test]
async fn dimension_descriptions_come_from_dictionaries() {
    let control = control();
    control
        .ingest_indicator(&fixture_provider(), request(INDICATOR, false, 100))
        .await
        .expect("ingest should succeed");

    let metadata_writes: Vec<_> = control
        .store()
        .transactions()
        .into_iter()
        .filter(|txn| txn.query == cypher::SERIES_METADATA_UPSERT)
        .collect();
    assert_eq!(metadata_writes.len(), 2);
    let first = &metadata_writes[0].params;
    assert_eq!(first["d_code"], "A|FC_E");
    assert_eq!(first["dim_desc"], "Annual|Final consumption - energy use");
    assert_eq!(first["att_code"], "PC");
    assert_eq!(first["att_desc"], "Percentage");
    assert_eq!(first["s_code"], INDICATOR);
}

#[tokio::test]
async fn series_metadata_is_written_before_observations() {
    let control = control();
    control
        .ingest_indicator(&fixture_provider(), request(INDICATOR, false, 2))
        .await
        .expect("ingest should succeed");

    let transactions = control.store().transactions();
    let first_batch = transactions
        .iter()
        .position(common::Transaction::is_observation_batch)
        .expect("observation batches written");
    assert!(transactions[..first_batch]
        .iter()
        .all(|txn| txn.query == cypher::SERIES_METADATA_UPSERT));
    assert!(transactions[first_batch..]
        .iter()
        .all(common::Transaction::is_observation_batch));
}

#[tokio::test]
async fn reloading_produces_the_same_observation_keys() {
    let control = control();
    control
        .ingest_indicator(&fixture_provider(), request(INDICATOR, false, 4))
        .await
        .expect("first ingest should succeed");
    let first = control.store().observation_keys();
    let metadata = control.store().series_metadata();

    control
        .ingest_indicator(&fixture_provider(), request(INDICATOR, false, 4))
        .await
        .expect("second ingest should succeed");

    assert_eq!(first.len(), 11);
    assert_eq!(control.store().observation_keys(), first);
    assert_eq!(control.store().series_metadata(), metadata);
}

#[tokio::test]
async fn dataset_without_area_column_is_not_applicable() {
    let control = control();
    let report = control
        .ingest_indicator(&fixture_provider(), request("no_area", false, 10))
        .await
        .expect("ingest should succeed");

    assert!(!report.applicable);
    assert!(report.reshape.is_none());
    assert!(report.load.is_none());
    assert!(control.store().transactions().is_empty());
}

#[tokio::test]
async fn filters_restrict_rows_and_periods() {
    let control = control();
    let mut request = request(INDICATOR, false, 100);
    request.filters = FilterParams::new()
        .with("nrg_bal", "PRD")
        .with("endPeriod", "2016");
    let report = control
        .ingest_indicator(&fixture_provider(), request)
        .await
        .expect("ingest should succeed");

    let load = report.load.expect("load report");
    assert_eq!(load.series_metadata_count, 1);
    assert_eq!(load.observation_count, 2);
    let times: Vec<String> = control
        .store()
        .observation_keys()
        .into_iter()
        .map(|key| key.time)
        .collect();
    assert_eq!(times, vec!["2015", "2016"]);
}

#[tokio::test]
async fn batches_hold_batch_size_rows_and_a_remainder() {
    for (rows, batch_size, expected) in [
        (7, 3, vec![3, 3, 1]),
        (6, 3, vec![3, 3]),
        (2, 5, vec![2]),
        (0, 5, vec![]),
    ] {
        let control = control();
        let report = control
            .load(&long_rows(rows), INDICATOR, batch_size, GeoCodeKind::EuCode)
            .await
            .expect("load should succeed");
        let sizes: Vec<usize> = control
            .store()
            .transactions()
            .iter()
            .filter(|txn| txn.is_observation_batch())
            .map(common::Transaction::batch_len)
            .collect();
        assert_eq!(sizes, expected, "{rows} rows in batches of {batch_size}");
        assert_eq!(report.batches.len(), expected.len());
        assert!(report
            .batches
            .iter()
            .enumerate()
            .all(|(offset, batch)| batch.index == offset + 1));
    }
}

#[tokio::test]
async fn zero_batch_size_is_rejected_before_any_write() {
    let control = control();
    let err = control
        .load(&long_rows(3), INDICATOR, 0, GeoCodeKind::EuCode)
        .await
        .expect_err("zero batch size should fail");
    assert!(matches!(err, ControlError::InvalidInput(_)));
    assert!(control.store().transactions().is_empty());
}

#[tokio::test]
async fn failed_transaction_aborts_the_run() {
    // One metadata write, then the second observation batch fails.
    let control = SdgControlPlane::new(
        RecordingStore::new(&["EL30"], &[]).failing_on(3),
    );
    let err = control
        .load(&long_rows(5), INDICATOR, 2, GeoCodeKind::EuCode)
        .await
        .expect_err("store failure should abort");
    assert!(matches!(err, ControlError::Store(_)));

    let transactions = control.store().transactions();
    assert_eq!(transactions.len(), 2);
    assert_eq!(control.store().observation_keys().len(), 2);
}
