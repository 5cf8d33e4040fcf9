use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::catalog;
use super::domain::PreferenceEntry;
use super::selection::{CandidateSelector, SelectionLimits, SelectionSource};
use super::validation::{validate_request, PredictionRequest, ValidationError};
use crate::cutoffs::CutoffTable;

pub const HISTOGRAM_BINS: u8 = 20;

/// Supplies the cutoff table a request is scored against.
pub trait CutoffRepository: Send + Sync {
    fn snapshot(&self) -> Result<CutoffTable, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("cutoff data unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PreferenceServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Histogram-ready summary of the probabilities in a preference list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityHistogram {
    pub x: Vec<f64>,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub nbinsx: u8,
}

impl ProbabilityHistogram {
    pub fn from_entries(entries: &[PreferenceEntry]) -> Self {
        Self {
            x: entries.iter().map(|entry| entry.probability).collect(),
            kind: "histogram",
            nbinsx: HISTOGRAM_BINS,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionOutcome {
    pub preferences: Vec<PreferenceEntry>,
    pub plot_data: ProbabilityHistogram,
    pub source: SelectionSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataHealth {
    pub data_loaded: bool,
    pub seat_count: usize,
}

/// Service composing validation, the table filter and the candidate selector.
pub struct PreferenceService<R> {
    repository: Arc<R>,
    selector: CandidateSelector,
}

impl<R> PreferenceService<R>
where
    R: CutoffRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_limits(repository, SelectionLimits::default())
    }

    pub fn with_limits(repository: Arc<R>, limits: SelectionLimits) -> Self {
        Self {
            repository,
            selector: CandidateSelector::new(limits),
        }
    }

    pub fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionOutcome, PreferenceServiceError> {
        let query = validate_request(request)?;
        let table = self.repository.snapshot()?;
        let matching = query.filter.apply(table.seats());

        let selection = self.selector.select_or_synthesize(
            &matching,
            query.rank,
            query.min_probability,
            &query.filter,
        );

        info!(
            rank = query.rank,
            matching = matching.len(),
            preferences = selection.entries.len(),
            source = ?selection.source,
            "generated preference list"
        );

        let plot_data = ProbabilityHistogram::from_entries(&selection.entries);
        Ok(PredictionOutcome {
            preferences: selection.entries,
            plot_data,
            source: selection.source,
        })
    }

    pub fn branches(&self) -> Result<Vec<String>, PreferenceServiceError> {
        let table = self.repository.snapshot()?;
        Ok(catalog::branches(&table))
    }

    pub fn health(&self) -> Result<DataHealth, PreferenceServiceError> {
        let table = self.repository.snapshot()?;
        Ok(DataHealth {
            data_loaded: !table.is_empty(),
            seat_count: table.len(),
        })
    }
}
