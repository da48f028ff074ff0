//! Eurostat TSV format.
//!
//! Data files carry the identifier columns comma-joined in the first cell
//! (`freq,unit,geo\TIME_PERIOD`) and one tab-separated cell per period.
//! Codelists are `code<TAB>label` lines.

use csv::{ReaderBuilder, StringRecord};

use super::{
    CodeDictionary, FILTER_END_PERIOD, FILTER_START_PERIOD, FilterParams, ProviderError,
    WideTable,
};
use crate::reshape::{is_time_column, normalize_column_name};

const MISSING_VALUE: &str = ":";

fn tab_reader(text: &str, has_headers: bool) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_headers)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes())
}

fn record_line(record: &StringRecord) -> usize {
    record
        .position()
        .and_then(|position| usize::try_from(position.line()).ok())
        .unwrap_or_default()
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

/// Parses a Eurostat TSV data file into a wide table.
///
/// # Errors
/// Returns `ProviderError::Parse` if the header is empty or a row's cell count
/// does not match the header.
pub fn parse_wide_tsv(text: &str) -> Result<WideTable, ProviderError> {
    let mut reader = tab_reader(text, true);
    let header = reader.headers()?.clone();
    if is_blank(&header) {
        return Err(ProviderError::Parse {
            line: 1,
            message: "missing header".to_string(),
        });
    }

    let id_header = header.get(0).unwrap_or_default();
    let id_columns: Vec<String> = id_header.split(',').map(|name| name.trim().to_string()).collect();
    if id_columns.iter().any(String::is_empty) {
        return Err(ProviderError::Parse {
            line: 1,
            message: format!("empty identifier column in `{id_header}`"),
        });
    }
    let period_columns: Vec<String> = header.iter().skip(1).map(|name| name.trim().to_string()).collect();

    let mut columns = id_columns.clone();
    columns.extend(period_columns.iter().cloned());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if is_blank(&record) {
            continue;
        }
        let line = record_line(&record);
        let ids: Vec<&str> = record.get(0).unwrap_or_default().split(',').collect();
        if ids.len() != id_columns.len() {
            return Err(ProviderError::Parse {
                line,
                message: format!(
                    "expected {} identifier values, found {}",
                    id_columns.len(),
                    ids.len()
                ),
            });
        }
        if record.len() - 1 != period_columns.len() {
            return Err(ProviderError::Parse {
                line,
                message: format!(
                    "expected {} period values, found {}",
                    period_columns.len(),
                    record.len() - 1
                ),
            });
        }

        let mut row: Vec<Option<String>> = ids
            .into_iter()
            .map(|id| {
                let id = id.trim();
                (!id.is_empty()).then(|| id.to_string())
            })
            .collect();
        row.extend(record.iter().skip(1).map(parse_value_cell));
        rows.push(row);
    }

    Ok(WideTable::new(columns, rows))
}

/// Strips observation flags (`12.3 p`) and maps `:` to a missing cell.
#[must_use]
pub fn parse_value_cell(cell: &str) -> Option<String> {
    let value = cell.split_whitespace().next()?;
    if value == MISSING_VALUE {
        return None;
    }
    Some(value.to_string())
}

/// Parses a `code<TAB>label` codelist. Lines without a label are skipped.
///
/// # Errors
/// Returns `ProviderError::Parse` if the codelist cannot be read.
pub fn parse_dictionary(text: &str) -> Result<CodeDictionary, ProviderError> {
    let mut dictionary = CodeDictionary::new();
    for record in tab_reader(text, false).records() {
        let record = record?;
        let (Some(code), Some(label)) = (record.get(0), record.get(1)) else {
            continue;
        };
        let (code, label) = (code.trim(), label.trim());
        if !code.is_empty() && !label.is_empty() {
            dictionary.insert(code.to_string(), label.to_string());
        }
    }
    Ok(dictionary)
}

/// Keeps the rows and time columns accepted by `filters`.
///
/// # Errors
/// Returns `ProviderError::InvalidFilter` when a filter names a column the
/// table does not have or a period bound is not numeric.
pub fn apply_filters(table: WideTable, filters: &FilterParams) -> Result<WideTable, ProviderError> {
    if filters.is_empty() {
        return Ok(table);
    }

    let normalized: Vec<String> = table
        .columns
        .iter()
        .map(|name| normalize_column_name(name))
        .collect();

    let mut start = None;
    let mut end = None;
    let mut row_filters = Vec::new();
    for (key, values) in filters.iter() {
        if key == FILTER_START_PERIOD {
            start = Some(parse_period_bound(key, values)?);
            continue;
        }
        if key == FILTER_END_PERIOD {
            end = Some(parse_period_bound(key, values)?);
            continue;
        }
        let wanted = normalize_column_name(key);
        let Some(index) = normalized.iter().position(|name| *name == wanted) else {
            return Err(ProviderError::InvalidFilter(format!(
                "unknown column `{key}`"
            )));
        };
        row_filters.push((index, values));
    }

    let keep_column: Vec<bool> = normalized
        .iter()
        .map(|name| {
            if !is_time_column(name) {
                return true;
            }
            let Ok(period) = name.parse::<u64>() else {
                return true;
            };
            start.is_none_or(|bound| period >= bound) && end.is_none_or(|bound| period <= bound)
        })
        .collect();

    let columns = select(&table.columns, &keep_column);
    let rows = table
        .rows
        .iter()
        .filter(|row| {
            row_filters.iter().all(|(index, values)| {
                row.get(*index)
                    .and_then(Option::as_deref)
                    .is_some_and(|cell| values.iter().any(|value| value == cell))
            })
        })
        .map(|row| select(row, &keep_column))
        .collect();

    Ok(WideTable::new(columns, rows))
}

fn select<T: Clone>(items: &[T], keep: &[bool]) -> Vec<T> {
    items
        .iter()
        .zip(keep)
        .filter(|(_, keep)| **keep)
        .map(|(item, _)| item.clone())
        .collect()
}

fn parse_period_bound(key: &str, values: &[String]) -> Result<u64, ProviderError> {
    let [value] = values else {
        return Err(ProviderError::InvalidFilter(format!(
            "{key} takes exactly one value"
        )));
    };
    value
        .trim()
        .parse()
        .map_err(|_| ProviderError::InvalidFilter(format!("{key}={value} is not a year")))
}
