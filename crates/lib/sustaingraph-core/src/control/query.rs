use serde::de::DeserializeOwned;
use serde_json::json;
use sustaingraph_store::schema::{
    LABEL_GEO_AREA, LABEL_INDICATOR, LABEL_OBSERVATION, LABEL_POLICY_FRAMEWORK, LABEL_SDG,
    LABEL_SERIES_METADATA, SDG_PREFIX,
};
use sustaingraph_store::{
    PeerRegionRow, PolicyFrameworkRow, QueryEnvelope, QueryMetadata, RegionalProfileRow,
    TrendPoint,
};
use tracing::debug;

use crate::store::{GraphStore, QueryParams, bind, cypher, decode_rows};

use super::{ControlError, SdgControlPlane};

/// Normalizes an SDG identifier (`SDG_7`, `sdg_07`, `7`) to its series prefix (`sdg_07`).
///
/// # Errors
/// Returns `ControlError::InvalidInput` when the last `_` segment is not a number.
pub fn normalize_sdg_prefix(sdg_id: &str) -> Result<String, ControlError> {
    let lowered = sdg_id.trim().to_lowercase();
    let goal = lowered.rsplit('_').next().unwrap_or_default();
    if goal.is_empty() || !goal.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ControlError::InvalidInput(format!(
            "sdg_id `{sdg_id}` must end with a goal number, e.g. SDG_7"
        )));
    }
    Ok(format!("{SDG_PREFIX}{goal:0>2}"))
}

fn required(value: &str, field: &str) -> Result<String, ControlError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ControlError::InvalidInput(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn metadata(nodes: &[&str]) -> QueryMetadata {
    QueryMetadata {
        nodes: nodes.iter().map(ToString::to_string).collect(),
        extra: None,
    }
}

impl<S: GraphStore> SdgControlPlane<S> {
    async fn envelope<T: DeserializeOwned>(
        &self,
        statement: &str,
        params: QueryParams,
        metadata: QueryMetadata,
    ) -> Result<QueryEnvelope<T>, ControlError> {
        let rows = self.store().run_query(statement, params).await?;
        debug!(rows = rows.len(), "query tool returned");
        Ok(QueryEnvelope {
            result: decode_rows(rows)?,
            query: statement.to_string(),
            metadata,
        })
    }

    /// Latest observations of a region for one SDG, newest first, at most 30.
    ///
    /// # Errors
    /// Returns `ControlError::InvalidInput` for malformed arguments or a store error.
    pub async fn regional_sdg_profile(
        &self,
        geo_id: &str,
        sdg_id: &str,
    ) -> Result<QueryEnvelope<RegionalProfileRow>, ControlError> {
        let geo_id = required(geo_id, "geo_id")?;
        let sdg_prefix = normalize_sdg_prefix(sdg_id)?;
        let params = bind(QueryParams::new(), "geo_id", &geo_id)?;
        let params = bind(params, "sdg_prefix", &sdg_prefix)?;
        self.envelope(
            cypher::REGIONAL_PROFILE,
            params,
            metadata(&[
                LABEL_GEO_AREA,
                LABEL_OBSERVATION,
                LABEL_SERIES_METADATA,
                LABEL_INDICATOR,
            ]),
        )
        .await
    }

    /// Regions sharing at least two of the target's series for one SDG, at most 5.
    ///
    /// # Errors
    /// Returns `ControlError::InvalidInput` for malformed arguments or a store error.
    pub async fn peer_regions(
        &self,
        geo_id: &str,
        sdg_id: &str,
    ) -> Result<QueryEnvelope<PeerRegionRow>, ControlError> {
        let geo_id = required(geo_id, "geo_id")?;
        let sdg_prefix = normalize_sdg_prefix(sdg_id)?;
        let params = bind(QueryParams::new(), "geo_id", &geo_id)?;
        let params = bind(params, "sdg_prefix", &sdg_prefix)?;
        self.envelope(
            cypher::PEER_REGIONS,
            params,
            metadata(&[LABEL_GEO_AREA, LABEL_OBSERVATION, LABEL_SERIES_METADATA]),
        )
        .await
    }

    /// Full time series of one indicator for one region, oldest first.
    ///
    /// # Errors
    /// Returns `ControlError::InvalidInput` for malformed arguments or a store error.
    pub async fn indicator_trend(
        &self,
        indicator_id: &str,
        geo_id: &str,
    ) -> Result<QueryEnvelope<TrendPoint>, ControlError> {
        let indicator_id = required(indicator_id, "indicator_id")?;
        let geo_id = required(geo_id, "geo_id")?;
        let params = bind(QueryParams::new(), "indicator_id", &indicator_id)?;
        let params = bind(params, "geo_id", &geo_id)?;
        self.envelope(
            cypher::INDICATOR_TREND,
            params,
            metadata(&[LABEL_GEO_AREA, LABEL_OBSERVATION, LABEL_SERIES_METADATA]),
        )
        .await
    }

    /// Policy frameworks with up to three policy areas each, at most 10.
    ///
    /// The frameworks are not yet filtered by SDG or region; the metadata says so.
    ///
    /// # Errors
    /// Returns `ControlError::InvalidInput` for malformed arguments or a store error.
    pub async fn sdg_policy_mapping(
        &self,
        sdg_id: &str,
        geo_id: &str,
    ) -> Result<QueryEnvelope<PolicyFrameworkRow>, ControlError> {
        let sdg_prefix = normalize_sdg_prefix(sdg_id)?;
        let geo_id = required(geo_id, "geo_id")?;
        let params = bind(QueryParams::new(), "sdg_id", sdg_id.trim())?;
        let params = bind(params, "geo_id", &geo_id)?;
        let mut metadata = metadata(&[LABEL_SDG, LABEL_POLICY_FRAMEWORK]);
        metadata.extra = Some(json!({
            "sdg_prefix": sdg_prefix,
            "sdg_filter_applied": false,
            "note": "frameworks are not yet linked to SDGs; all frameworks are listed",
        }));
        self.envelope(cypher::POLICY_MAPPING, params, metadata).await
    }
}
