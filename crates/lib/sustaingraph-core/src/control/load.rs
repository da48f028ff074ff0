use std::collections::HashSet;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use sustaingraph_store::{GeoCodeKind, LongRow, ObservationParams, SeriesMetadataSignature};
use tracing::{debug, info};

use crate::store::{GraphStore, QueryParams, bind, cypher};

use super::{ControlError, SdgControlPlane, ensure_non_empty};

/// Timing and size of one committed observation batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchStats {
    /// 1-based position of the batch within its run.
    pub index: usize,
    pub rows: usize,
    pub elapsed_ms: u64,
}

/// Summary of a completed load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadReport {
    pub indicator_code: String,
    pub series_metadata_count: usize,
    pub observation_count: usize,
    pub batches: Vec<BatchStats>,
}

/// Distinct metadata signatures in first-seen order.
#[must_use]
pub fn distinct_signatures(rows: &[LongRow]) -> Vec<SeriesMetadataSignature> {
    let mut seen = HashSet::new();
    rows.iter()
        .map(LongRow::signature)
        .filter(|signature| seen.insert(signature.clone()))
        .collect()
}

impl<S: GraphStore> SdgControlPlane<S> {
    /// Loads reshaped rows under the series and indicator named `indicator_code`.
    ///
    /// Every metadata signature is written before the first observation batch.
    ///
    /// # Errors
    /// Returns `ControlError::InvalidInput` for an empty code or a zero batch
    /// size, or the first store error, which aborts the run.
    pub async fn load(
        &self,
        rows: &[LongRow],
        indicator_code: &str,
        batch_size: usize,
        geo_kind: GeoCodeKind,
    ) -> Result<LoadReport, ControlError> {
        ensure_non_empty(indicator_code, "indicator_code")?;
        ensure_batch_size(batch_size)?;

        let signatures = distinct_signatures(rows);
        self.write_series_metadata(&signatures, indicator_code).await?;

        let observations: Vec<ObservationParams> = rows
            .iter()
            .map(|row| row.to_observation(indicator_code, indicator_code))
            .collect();
        let batches = self
            .write_observation_batches(&observations, batch_size, geo_kind)
            .await?;

        info!(
            indicator = indicator_code,
            series_metadata = signatures.len(),
            observations = observations.len(),
            batches = batches.len(),
            "load finished"
        );
        Ok(LoadReport {
            indicator_code: indicator_code.to_string(),
            series_metadata_count: signatures.len(),
            observation_count: observations.len(),
            batches,
        })
    }

    /// Upserts one `SeriesMetadata` per signature, one transaction each.
    ///
    /// # Errors
    /// Returns the first store error.
    pub async fn write_series_metadata(
        &self,
        signatures: &[SeriesMetadataSignature],
        series_code: &str,
    ) -> Result<(), ControlError> {
        for signature in signatures {
            let params = series_metadata_params(signature, series_code)?;
            self.store()
                .run_transaction(cypher::SERIES_METADATA_UPSERT, params)
                .await?;
            debug!(
                series = series_code,
                dimensions = %signature.dim_codes,
                attributes = %signature.att_codes,
                "series metadata upserted"
            );
        }
        Ok(())
    }

    /// Writes observations in batches of exactly `batch_size`, the last one
    /// holding the remainder.
    ///
    /// # Errors
    /// Returns `ControlError::InvalidInput` for a zero batch size, or the first
    /// store error.
    pub async fn write_observation_batches(
        &self,
        observations: &[ObservationParams],
        batch_size: usize,
        geo_kind: GeoCodeKind,
    ) -> Result<Vec<BatchStats>, ControlError> {
        ensure_batch_size(batch_size)?;
        let statement = cypher::observation_upsert(geo_kind);
        let mut stats = Vec::new();
        for (offset, batch) in observations.chunks(batch_size).enumerate() {
            let started = Instant::now();
            let params = bind(QueryParams::new(), "parameters", batch)?;
            self.store().run_transaction(&statement, params).await?;
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            let batch_stats = BatchStats {
                index: offset + 1,
                rows: batch.len(),
                elapsed_ms,
            };
            info!(
                batch = batch_stats.index,
                rows = batch_stats.rows,
                elapsed_ms,
                "observation batch committed"
            );
            stats.push(batch_stats);
        }
        Ok(stats)
    }
}

fn series_metadata_params(
    signature: &SeriesMetadataSignature,
    series_code: &str,
) -> Result<QueryParams, ControlError> {
    let params = bind(QueryParams::new(), "s_code", series_code)?;
    let params = bind(params, "att_code", &signature.att_codes)?;
    let params = bind(params, "d_code", &signature.dim_codes)?;
    let params = bind(params, "att_desc", &signature.att_desc)?;
    Ok(bind(params, "dim_desc", &signature.dim_desc)?)
}

fn ensure_batch_size(batch_size: usize) -> Result<(), ControlError> {
    if batch_size == 0 {
        return Err(ControlError::InvalidInput(
            "batch_size must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
