use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sustaingraph_store::GeoCodeKind;
use tracing::{info, warn};

use crate::provider::{
    CodeDictionary, DimensionDictionaries, FilterParams, ProviderError, TabularProvider,
};
use crate::reshape::{ColumnLayout, ReshapeReport, reshape};
use crate::store::{GraphStore, QueryParams, cypher, decode_rows};

use super::load::LoadReport;
use super::{ControlError, SdgControlPlane, ensure_non_empty};

/// Input for loading one Eurostat-style indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorIngestRequest {
    pub code: String,
    #[serde(default)]
    pub filters: FilterParams,
    #[serde(default)]
    pub subnational: bool,
    pub batch_size: usize,
    #[serde(default)]
    pub geo_kind: GeoCodeKind,
}

/// Summary of an indicator ingest.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorIngestReport {
    pub code: String,
    /// `false` when the dataset has no area column and nothing was loaded.
    pub applicable: bool,
    pub known_areas: usize,
    pub missing_dictionaries: Vec<String>,
    pub reshape: Option<ReshapeReport>,
    pub load: Option<LoadReport>,
}

#[derive(Debug, Deserialize)]
struct CodeListRow {
    #[serde(default)]
    codes: Vec<String>,
}

impl<S: GraphStore> SdgControlPlane<S> {
    /// Returns the area codes the graph already knows for `kind`.
    ///
    /// # Errors
    /// Returns `ControlError` if the query fails or its rows do not decode.
    pub async fn known_areas(&self, kind: GeoCodeKind) -> Result<HashSet<String>, ControlError> {
        let statement = match kind {
            GeoCodeKind::EuCode => cypher::KNOWN_EU_AREAS,
            GeoCodeKind::IsoAlpha3 => cypher::KNOWN_ISO_AREAS,
        };
        self.code_list(statement).await
    }

    pub(crate) async fn code_list(&self, statement: &str) -> Result<HashSet<String>, ControlError> {
        let rows = self.store().run_query(statement, QueryParams::new()).await?;
        let rows: Vec<CodeListRow> = decode_rows(rows)?;
        Ok(rows.into_iter().flat_map(|row| row.codes).collect())
    }

    /// Fetches, reshapes, and loads one indicator dataset.
    ///
    /// # Errors
    /// Returns `ControlError` for invalid requests, provider failures, or the
    /// first failed store transaction.
    pub async fn ingest_indicator<P>(
        &self,
        provider: &P,
        request: IndicatorIngestRequest,
    ) -> Result<IndicatorIngestReport, ControlError>
    where
        P: TabularProvider + ?Sized,
    {
        let IndicatorIngestRequest {
            code,
            filters,
            subnational,
            batch_size,
            geo_kind,
        } = request;
        ensure_non_empty(&code, "code")?;
        if batch_size == 0 {
            return Err(ControlError::InvalidInput(
                "batch_size must be greater than zero".to_string(),
            ));
        }

        info!(code = %code, subnational, "ingesting indicator");
        let known_areas = self.known_areas(geo_kind).await?;
        let table = provider.fetch(&code, &filters).await?;

        let mut report = IndicatorIngestReport {
            code: code.clone(),
            applicable: false,
            known_areas: known_areas.len(),
            missing_dictionaries: Vec::new(),
            reshape: None,
            load: None,
        };

        let Some(layout) = ColumnLayout::classify(&table.columns) else {
            info!(code = %code, "dataset has no area column, not applicable");
            return Ok(report);
        };

        let mut dictionaries = DimensionDictionaries::new();
        for column in layout.described_columns() {
            let dictionary = match provider.fetch_dictionary(&code, column).await {
                Ok(dictionary) => dictionary,
                Err(ProviderError::NotFound(what)) => {
                    warn!(column, %what, "no dictionary, raw codes will be used");
                    report.missing_dictionaries.push(column.to_string());
                    CodeDictionary::new()
                }
                Err(err) => return Err(err.into()),
            };
            dictionaries.insert(column.to_string(), dictionary);
        }

        let Some(output) = reshape(&table, &known_areas, subnational, &dictionaries) else {
            return Ok(report);
        };
        report.applicable = true;

        let load = self
            .load(&output.rows, &code, batch_size, geo_kind)
            .await?;
        report.reshape = Some(output.report);
        report.load = Some(load);
        Ok(report)
    }
}
