use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info};

use super::{CodeDictionary, FilterParams, ProviderError, TabularProvider, WideTable, tsv};
use crate::reshape::normalize_column_name;

pub const DEFAULT_BASE_URL: &str = "https://ec.europa.eu/eurostat/api/dissemination/sdmx/2.1";
const AGENCY: &str = "ESTAT";

/// Eurostat dissemination API client speaking the TSV format.
#[derive(Debug, Clone)]
pub struct EurostatClient {
    http: reqwest::Client,
    base_url: String,
    lang: String,
}

impl Default for EurostatClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl EurostatClient {
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: "en".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    #[must_use]
    pub fn data_url(&self, code: &str) -> String {
        format!("{}/data/{code}?format=TSV&compressed=false", self.base_url)
    }

    #[must_use]
    pub fn codelist_url(&self, column: &str) -> String {
        format!(
            "{}/codelist/{AGENCY}/{}?format=TSV&lang={}",
            self.base_url,
            normalize_column_name(column).to_uppercase(),
            self.lang
        )
    }

    async fn get_text(&self, url: &str, what: String) -> Result<String, ProviderError> {
        debug!(%url, "requesting");
        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(what));
        }
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl TabularProvider for EurostatClient {
    async fn fetch(&self, code: &str, filters: &FilterParams) -> Result<WideTable, ProviderError> {
        let url = self.data_url(code);
        let text = self.get_text(&url, format!("dataset {code}")).await?;
        let table = tsv::parse_wide_tsv(&text)?;
        info!(code, rows = table.len(), columns = table.columns.len(), "fetched dataset");
        tsv::apply_filters(table, filters)
    }

    async fn fetch_dictionary(
        &self,
        _code: &str,
        column: &str,
    ) -> Result<CodeDictionary, ProviderError> {
        let url = self.codelist_url(column);
        let text = self.get_text(&url, format!("codelist {column}")).await?;
        tsv::parse_dictionary(&text)
    }
}
