//! World Happiness Report workbook import.
//!
//! The workbook is read with calamine. Country names are resolved to ISO
//! alpha-3 codes and restricted to the European areas present in the graph,
//! then every score column becomes one `Series` under the `happiness_score`
//! indicator.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};
use serde::{Deserialize, Serialize};
use sustaingraph_store::schema::{
    HAPPINESS_ATTRIBUTES_CODE, HAPPINESS_ATTRIBUTES_DESCRIPTION, HAPPINESS_DIMENSIONS_CODE,
    HAPPINESS_DIMENSIONS_DESCRIPTION, HAPPINESS_INDICATOR_CODE, HAPPINESS_INDICATOR_DESCRIPTION,
    HAPPINESS_PROVIDER_URL, HAPPINESS_SCORE_COLUMN, HAPPINESS_SOURCE_NAME,
};
use sustaingraph_store::{GeoCodeKind, ObservationParams};
use tracing::{info, warn};

use crate::country::resolve_countries;
use crate::store::{GraphStore, QueryParams, bind, cypher};

use super::load::BatchStats;
use super::{ControlError, SdgControlPlane, ensure_non_empty};

const COUNTRY_MARKER: &str = "Country";
const SERIES_MARKERS: [&str; 3] = ["Explained", "residual", "Happiness "];

/// Score columns of a happiness sheet, one row per country.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HappinessTable {
    pub country_column: String,
    pub series_columns: Vec<String>,
    pub rows: Vec<HappinessRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HappinessRow {
    pub country: String,
    pub values: Vec<Option<f64>>,
}

/// A country row ready to load, its name already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedHappinessRow {
    pub alpha3: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct HappinessPreprocessReport {
    pub rows_read: usize,
    pub unresolved_countries: Vec<String>,
    pub dropped_unresolved: usize,
    pub dropped_missing_values: usize,
    pub dropped_unknown_area: usize,
    pub rows_kept: usize,
}

/// Input for a happiness import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HappinessIngestRequest {
    pub workbook: PathBuf,
    pub sheet: Option<String>,
    pub year: String,
    /// Column name → series code, overriding the derived code.
    #[serde(default)]
    pub series_codes: BTreeMap<String, String>,
    pub batch_size: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SeriesLoad {
    pub column: String,
    pub series_code: String,
    pub observations: usize,
    pub batches: Vec<BatchStats>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HappinessIngestReport {
    pub year: String,
    pub preprocess: HappinessPreprocessReport,
    pub series: Vec<SeriesLoad>,
}

/// Reads a happiness sheet, keeping the country column and the score columns.
///
/// Uses the first sheet when `sheet` is `None`.
///
/// # Errors
/// Returns `ControlError::Workbook` if the file cannot be read and
/// `ControlError::InvalidInput` if the sheet has no country column.
pub fn read_happiness_workbook(
    path: &Path,
    sheet: Option<&str>,
) -> Result<HappinessTable, ControlError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ControlError::Workbook("workbook has no sheets".to_string()))?,
    };
    let range = workbook.worksheet_range(&sheet_name)?;
    let rows: Vec<&[Data]> = range.rows().collect();
    let Some((header, body)) = rows.split_first() else {
        return Err(ControlError::InvalidInput(format!(
            "sheet {sheet_name} is empty"
        )));
    };
    let headers: Vec<String> = header.iter().map(cell_text).collect();
    happiness_table(&headers, body.iter().map(|row| row.to_vec()))
}

/// Builds a `HappinessTable` from a header row and data rows.
///
/// # Errors
/// Returns `ControlError::InvalidInput` if no header mentions `Country`.
pub fn happiness_table<I>(headers: &[String], rows: I) -> Result<HappinessTable, ControlError>
where
    I: IntoIterator<Item = Vec<Data>>,
{
    let Some(country_index) = headers.iter().position(|name| name.contains(COUNTRY_MARKER)) else {
        return Err(ControlError::InvalidInput(
            "no column containing `Country`".to_string(),
        ));
    };
    let series: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| SERIES_MARKERS.iter().any(|marker| name.contains(marker)))
        .map(|(index, name)| (index, name.clone()))
        .collect();

    let rows = rows
        .into_iter()
        .filter_map(|cells| {
            let country = cells
                .get(country_index)
                .map(cell_text)?
                .replace('*', "")
                .trim()
                .to_string();
            if country.is_empty() {
                return None;
            }
            let values = series
                .iter()
                .map(|(index, _)| cells.get(*index).and_then(cell_number))
                .collect();
            Some(HappinessRow { country, values })
        })
        .collect();

    Ok(HappinessTable {
        country_column: headers[country_index].clone(),
        series_columns: series.into_iter().map(|(_, name)| name).collect(),
        rows,
    })
}

/// Resolves country names, drops incomplete rows, and keeps known areas only.
#[must_use]
pub fn preprocess_happiness(
    table: &HappinessTable,
    known_areas: &HashSet<String>,
) -> (Vec<ResolvedHappinessRow>, HappinessPreprocessReport) {
    let resolution = resolve_countries(table.rows.iter().map(|row| row.country.as_str()));
    let mut report = HappinessPreprocessReport {
        rows_read: table.rows.len(),
        unresolved_countries: resolution.unresolved,
        ..HappinessPreprocessReport::default()
    };
    if !report.unresolved_countries.is_empty() {
        warn!(countries = ?report.unresolved_countries, "countries without an ISO code");
    }

    let mut kept = Vec::new();
    for (row, code) in table.rows.iter().zip(resolution.codes) {
        let Some(alpha3) = code else {
            report.dropped_unresolved += 1;
            continue;
        };
        let Some(values) = row.values.iter().copied().collect::<Option<Vec<f64>>>() else {
            report.dropped_missing_values += 1;
            continue;
        };
        if !known_areas.contains(&alpha3) {
            report.dropped_unknown_area += 1;
            continue;
        }
        kept.push(ResolvedHappinessRow { alpha3, values });
    }
    report.rows_kept = kept.len();
    info!(
        read = report.rows_read,
        kept = report.rows_kept,
        unresolved = report.dropped_unresolved,
        missing = report.dropped_missing_values,
        unknown_area = report.dropped_unknown_area,
        "preprocessed happiness rows"
    );
    (kept, report)
}

/// Derives a series code from a column name (`Explained by: GDP per capita`
/// becomes `explained_by_gdp_per_capita`).
#[must_use]
pub fn series_code_for(column: &str) -> String {
    let mut code = String::with_capacity(column.len());
    for ch in column.chars() {
        if ch.is_alphanumeric() {
            code.extend(ch.to_lowercase());
        } else if !code.is_empty() && !code.ends_with('_') {
            code.push('_');
        }
    }
    code.trim_end_matches('_').to_string()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        Data::Float(value) => value.to_string(),
        Data::Int(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        _ => String::new(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn cell_number(cell: &Data) -> Option<f64> {
    let value = match cell {
        Data::Float(value) => Some(*value),
        Data::Int(value) => Some(*value as f64),
        Data::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    value.filter(|value| value.is_finite())
}

impl<S: GraphStore> SdgControlPlane<S> {
    /// Imports one year of a World Happiness Report workbook.
    ///
    /// # Errors
    /// Returns `ControlError` for unreadable workbooks, invalid requests, or
    /// the first failed store transaction.
    pub async fn ingest_happiness(
        &self,
        request: HappinessIngestRequest,
    ) -> Result<HappinessIngestReport, ControlError> {
        let HappinessIngestRequest {
            workbook,
            sheet,
            year,
            series_codes,
            batch_size,
        } = request;
        ensure_non_empty(&year, "year")?;
        if !year.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(ControlError::InvalidInput(format!("year {year} is not numeric")));
        }

        let table = tokio::task::spawn_blocking(move || {
            read_happiness_workbook(&workbook, sheet.as_deref())
        })
        .await
        .map_err(|err| ControlError::Workbook(err.to_string()))??;

        let known_areas = self.code_list(cypher::KNOWN_EUROPEAN_COUNTRIES).await?;
        let (rows, preprocess) = preprocess_happiness(&table, &known_areas);
        let series = self
            .load_happiness(&table.series_columns, &rows, &year, &series_codes, batch_size)
            .await?;

        Ok(HappinessIngestReport {
            year,
            preprocess,
            series,
        })
    }

    /// Writes the happiness indicator, its series, and their observations.
    ///
    /// # Errors
    /// Returns `ControlError::InvalidInput` for a zero batch size, or the first
    /// store error.
    pub async fn load_happiness(
        &self,
        series_columns: &[String],
        rows: &[ResolvedHappinessRow],
        year: &str,
        series_codes: &BTreeMap<String, String>,
        batch_size: usize,
    ) -> Result<Vec<SeriesLoad>, ControlError> {
        let mut loads = Vec::with_capacity(series_columns.len());
        for (position, column) in series_columns.iter().enumerate() {
            let series_code = series_codes
                .get(column)
                .cloned()
                .unwrap_or_else(|| series_code_for(column));
            let description = if column == HAPPINESS_SCORE_COLUMN {
                HAPPINESS_INDICATOR_DESCRIPTION
            } else {
                column.as_str()
            };
            let params = happiness_series_params(&series_code, description)?;
            self.store()
                .run_transaction(cypher::HAPPINESS_SERIES_UPSERT, params)
                .await?;

            let observations: Vec<ObservationParams> = rows
                .iter()
                .filter_map(|row| {
                    row.values.get(position).map(|value| ObservationParams {
                        ind_code: HAPPINESS_INDICATOR_CODE.to_string(),
                        code: series_code.clone(),
                        geo: row.alpha3.clone(),
                        year: year.to_string(),
                        value: *value,
                        att: HAPPINESS_ATTRIBUTES_CODE.to_string(),
                        dim: HAPPINESS_DIMENSIONS_CODE.to_string(),
                    })
                })
                .collect();
            let batches = self
                .write_observation_batches(&observations, batch_size, GeoCodeKind::IsoAlpha3)
                .await?;
            info!(series = %series_code, observations = observations.len(), "happiness series loaded");
            loads.push(SeriesLoad {
                column: column.clone(),
                series_code,
                observations: observations.len(),
                batches,
            });
        }
        Ok(loads)
    }
}

fn happiness_series_params(series_code: &str, description: &str) -> Result<QueryParams, ControlError> {
    let params = bind(QueryParams::new(), "source", HAPPINESS_SOURCE_NAME)?;
    let params = bind(params, "ind_code", HAPPINESS_INDICATOR_CODE)?;
    let params = bind(params, "ind_desc", HAPPINESS_INDICATOR_DESCRIPTION)?;
    let params = bind(params, "url", HAPPINESS_PROVIDER_URL)?;
    let params = bind(params, "s_code", series_code)?;
    let params = bind(params, "s_desc", description)?;
    let params = bind(params, "att_code", HAPPINESS_ATTRIBUTES_CODE)?;
    let params = bind(params, "d_code", HAPPINESS_DIMENSIONS_CODE)?;
    let params = bind(params, "att_desc", HAPPINESS_ATTRIBUTES_DESCRIPTION)?;
    Ok(bind(params, "dim_desc", HAPPINESS_DIMENSIONS_DESCRIPTION)?)
}
