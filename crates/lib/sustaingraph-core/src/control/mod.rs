use std::{error::Error, fmt, sync::Arc};

use crate::provider::ProviderError;
use crate::store::{GraphStore, StoreError};

pub mod happiness;
pub mod ingest;
pub mod load;
pub mod query;

pub use happiness::{HappinessIngestReport, HappinessIngestRequest, HappinessTable};
pub use ingest::{IndicatorIngestReport, IndicatorIngestRequest};
pub use load::{BatchStats, LoadReport};
pub use query::normalize_sdg_prefix;

#[derive(Debug)]
pub enum ControlError {
    Store(StoreError),
    Provider(ProviderError),
    Workbook(String),
    InvalidInput(String),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Provider(err) => write!(f, "{err}"),
            Self::Workbook(message) => write!(f, "Workbook error: {message}"),
            Self::InvalidInput(message) => write!(f, "Invalid input: {message}"),
        }
    }
}

impl Error for ControlError {}

impl From<StoreError> for ControlError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidInput(message) => Self::InvalidInput(message),
            other => Self::Store(other),
        }
    }
}

impl From<ProviderError> for ControlError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::InvalidFilter(message) => Self::InvalidInput(message),
            other => Self::Provider(other),
        }
    }
}

impl From<calamine::Error> for ControlError {
    fn from(err: calamine::Error) -> Self {
        Self::Workbook(err.to_string())
    }
}

/// Entry point for loads and queries against one graph store.
pub struct SdgControlPlane<S: GraphStore> {
    store: Arc<S>,
}

impl<S: GraphStore> Clone for SdgControlPlane<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: GraphStore> SdgControlPlane<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub const fn from_arc(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub(crate) fn ensure_non_empty(value: &str, field: &str) -> Result<(), ControlError> {
    if value.trim().is_empty() {
        return Err(ControlError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}
