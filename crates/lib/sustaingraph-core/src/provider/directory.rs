use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{CodeDictionary, FilterParams, ProviderError, TabularProvider, WideTable, tsv};
use crate::reshape::normalize_column_name;

const DICTIONARY_DIR: &str = "dic";

/// Reads `{root}/{code}.tsv` datasets and `{root}/dic/{column}.dic` codelists.
#[derive(Debug, Clone)]
pub struct TsvDirectoryProvider {
    root: PathBuf,
}

impl TsvDirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dataset_path(&self, code: &str) -> PathBuf {
        self.root.join(format!("{code}.tsv"))
    }

    fn dictionary_path(&self, column: &str) -> PathBuf {
        self.root
            .join(DICTIONARY_DIR)
            .join(format!("{}.dic", normalize_column_name(column)))
    }
}

#[async_trait]
impl TabularProvider for TsvDirectoryProvider {
    async fn fetch(&self, code: &str, filters: &FilterParams) -> Result<WideTable, ProviderError> {
        let path = self.dataset_path(code);
        debug!(path = %path.display(), "reading dataset");
        let text = tokio::fs::read_to_string(&path).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ProviderError::NotFound(format!("dataset {code} at {}", path.display()))
            } else {
                ProviderError::Io(err)
            }
        })?;
        let table = tsv::parse_wide_tsv(&text)?;
        tsv::apply_filters(table, filters)
    }

    async fn fetch_dictionary(
        &self,
        _code: &str,
        column: &str,
    ) -> Result<CodeDictionary, ProviderError> {
        let path = self.dictionary_path(column);
        let text = tokio::fs::read_to_string(&path).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ProviderError::NotFound(format!("dictionary {column} at {}", path.display()))
            } else {
                ProviderError::Io(err)
            }
        })?;
        tsv::parse_dictionary(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_dataset_and_dictionary() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("dic")).expect("dic dir");
        std::fs::write(
            dir.path().join("sdg_07_40.tsv"),
            "unit,geo\\TIME_PERIOD\t2015\nPC,EL30\t10.5\n",
        )
        .expect("write dataset");
        std::fs::write(dir.path().join("dic").join("unit.dic"), "PC\tPercentage\n")
            .expect("write dictionary");

        let provider = TsvDirectoryProvider::new(dir.path());
        let table = provider
            .fetch("sdg_07_40", &FilterParams::new())
            .await
            .expect("dataset should load");
        assert_eq!(table.len(), 1);

        let dict = provider
            .fetch_dictionary("sdg_07_40", "UNIT")
            .await
            .expect("dictionary should load");
        assert_eq!(dict.get("PC").map(String::as_str), Some("Percentage"));
    }

    #[tokio::test]
    async fn missing_dataset_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let provider = TsvDirectoryProvider::new(dir.path());
        let err = provider
            .fetch("absent", &FilterParams::new())
            .await
            .expect_err("missing file should fail");
        assert!(matches!(err, ProviderError::NotFound(_)));
    }
}
