use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Property of a `GeoArea` node that area codes are matched against.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GeoCodeKind {
    /// Eurostat/NUTS style codes (`EL30`, `DE`).
    #[default]
    EuCode,
    /// ISO 3166-1 alpha-3 codes (`GRC`).
    IsoAlpha3,
}

impl GeoCodeKind {
    #[must_use]
    pub const fn property(self) -> &'static str {
        match self {
            Self::EuCode => "EUcode",
            Self::IsoAlpha3 => "ISOalpha3code",
        }
    }
}

/// One row of the long observation table produced by reshaping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LongRow {
    pub geo: String,
    pub time: String,
    pub value: f64,
    pub dim_codes: String,
    pub dim_desc: String,
    pub att_codes: String,
    pub att_desc: String,
}

impl LongRow {
    #[must_use]
    pub fn signature(&self) -> SeriesMetadataSignature {
        SeriesMetadataSignature {
            dim_codes: self.dim_codes.clone(),
            att_codes: self.att_codes.clone(),
            dim_desc: self.dim_desc.clone(),
            att_desc: self.att_desc.clone(),
        }
    }

    /// Builds the UNWIND parameters for this row under a series and indicator.
    #[must_use]
    pub fn to_observation(&self, indicator_code: &str, series_code: &str) -> ObservationParams {
        ObservationParams {
            ind_code: indicator_code.to_string(),
            code: series_code.to_string(),
            geo: self.geo.clone(),
            year: self.time.clone(),
            value: self.value,
            att: self.att_codes.clone(),
            dim: self.dim_codes.clone(),
        }
    }
}

/// Distinct dimension/attribute signature persisted as a `SeriesMetadata` node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SeriesMetadataSignature {
    pub dim_codes: String,
    pub att_codes: String,
    pub dim_desc: String,
    pub att_desc: String,
}

/// Parameters for a single observation inside an `UNWIND $parameters` batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservationParams {
    pub ind_code: String,
    pub code: String,
    pub geo: String,
    pub year: String,
    pub value: f64,
    pub att: String,
    pub dim: String,
}

impl ObservationParams {
    #[must_use]
    pub fn key(&self) -> ObservationKey {
        ObservationKey {
            series_code: self.code.clone(),
            dimensions_code: self.dim.clone(),
            attributes_code: self.att.clone(),
            time: self.year.clone(),
            geo_code: self.geo.clone(),
        }
    }
}

/// Composite identity of an observation in the graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObservationKey {
    pub series_code: String,
    pub dimensions_code: String,
    pub attributes_code: String,
    pub time: String,
    pub geo_code: String,
}

/// Row returned by the regional SDG profile query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionalProfileRow {
    pub region: Option<String>,
    pub indicator_code: Option<String>,
    pub indicator_desc: Option<String>,
    pub value: Option<f64>,
    pub time: Option<String>,
}

/// Row returned by the peer region query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeerRegionRow {
    pub peer_name: Option<String>,
    pub peer_geo_id: Option<String>,
    pub shared_indicators: i64,
    pub total_indicators: i64,
}

/// Row returned by the indicator trend query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub time: Option<String>,
    pub value: Option<f64>,
}

/// Row returned by the policy mapping query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyFrameworkRow {
    pub framework_name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub policy_areas: Vec<String>,
}

/// Graph elements a query touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryMetadata {
    pub nodes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
}

/// Envelope returned by every query tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryEnvelope<T> {
    pub result: Vec<T>,
    pub query: String,
    pub metadata: QueryMetadata,
}
