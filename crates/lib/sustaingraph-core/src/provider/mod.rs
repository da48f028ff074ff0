//! Tabular data providers.
//!
//! A provider turns an indicator code into a wide table (one row per
//! dimension combination, one column per time period) and resolves
//! code→description dictionaries for the table's columns.

pub mod directory;
pub mod eurostat;
pub mod tsv;

use std::collections::{BTreeMap, HashMap};
use std::{error::Error, fmt};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use directory::TsvDirectoryProvider;
pub use eurostat::EurostatClient;

/// Raw code → human description for one column.
pub type CodeDictionary = HashMap<String, String>;
/// Dictionaries keyed by normalized column name.
pub type DimensionDictionaries = HashMap<String, CodeDictionary>;

/// Filter parameter that bounds time columns from below (inclusive).
pub const FILTER_START_PERIOD: &str = "startPeriod";
/// Filter parameter that bounds time columns from above (inclusive).
pub const FILTER_END_PERIOD: &str = "endPeriod";

/// Column name → accepted values. `startPeriod`/`endPeriod` bound time columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterParams {
    entries: BTreeMap<String, Vec<String>>,
}

impl FilterParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(value.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }

    /// Parses `key=value` pairs as given on the command line.
    ///
    /// # Errors
    /// Returns `ProviderError::InvalidFilter` for pairs without `=`.
    pub fn parse_pairs<I, S>(pairs: I) -> Result<Self, ProviderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filters = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let Some((key, value)) = pair.split_once('=') else {
                return Err(ProviderError::InvalidFilter(pair.to_string()));
            };
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                return Err(ProviderError::InvalidFilter(pair.to_string()));
            }
            for item in value.split(',').map(str::trim).filter(|item| !item.is_empty()) {
                filters.insert(key, item);
            }
        }
        Ok(filters)
    }
}

/// Wide statistical table as delivered by a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WideTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl WideTable {
    #[must_use]
    pub const fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the cell at `row`/`column`, treating short rows as missing cells.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .and_then(Option::as_deref)
    }
}

#[derive(Debug)]
pub enum ProviderError {
    Http(Box<reqwest::Error>),
    Io(std::io::Error),
    Parse { line: usize, message: String },
    NotFound(String),
    InvalidFilter(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "HTTP error: {err}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::Parse { line, message } => write!(f, "TSV parse error at line {line}: {message}"),
            Self::NotFound(what) => write!(f, "not found: {what}"),
            Self::InvalidFilter(filter) => write!(f, "invalid filter: {filter}"),
        }
    }
}

impl Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(Box::new(err))
    }
}

impl From<csv::Error> for ProviderError {
    fn from(err: csv::Error) -> Self {
        let line = err
            .position()
            .and_then(|position| usize::try_from(position.line()).ok())
            .unwrap_or_default();
        Self::Parse {
            line,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ProviderError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(err.to_string())
        } else {
            Self::Io(err)
        }
    }
}

/// Source of wide statistical tables and their code dictionaries.
#[async_trait]
pub trait TabularProvider: Send + Sync {
    /// Fetches the dataset for `code`, applying `filters` when present.
    async fn fetch(&self, code: &str, filters: &FilterParams) -> Result<WideTable, ProviderError>;

    /// Fetches the code→description dictionary for a column of `code`.
    async fn fetch_dictionary(&self, code: &str, column: &str)
    -> Result<CodeDictionary, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pairs_splits_comma_lists() {
        let filters = FilterParams::parse_pairs(["geo=EL30,EL41", "startPeriod=2015"])
            .expect("filters should parse");
        let entries: Vec<_> = filters.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            filters.iter().find(|(key, _)| *key == "geo").map(|(_, v)| v.clone()),
            Some(vec!["EL30".to_string(), "EL41".to_string()])
        );
    }

    #[test]
    fn parse_pairs_rejects_missing_separator() {
        let err = FilterParams::parse_pairs(["geo"]).expect_err("should reject");
        assert!(matches!(err, ProviderError::InvalidFilter(_)));
    }

    #[test]
    fn cell_treats_short_rows_as_missing() {
        let table = WideTable::new(
            vec!["geo".to_string(), "2015".to_string()],
            vec![vec![Some("EL30".to_string())]],
        );
        assert_eq!(table.cell(0, 0), Some("EL30"));
        assert_eq!(table.cell(0, 1), None);
    }
}
