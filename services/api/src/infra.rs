use josaa_predictor::config::AppConfig;
use josaa_predictor::counselling::{CutoffRepository, RepositoryError};
use josaa_predictor::cutoffs::{CutoffImporter, CutoffTable};
use josaa_predictor::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Cutoff table loaded once at startup and shared by every request.
#[derive(Debug, Default, Clone)]
pub(crate) struct InMemoryCutoffRepository {
    table: CutoffTable,
}

impl InMemoryCutoffRepository {
    pub(crate) fn new(table: CutoffTable) -> Self {
        Self { table }
    }
}

impl CutoffRepository for InMemoryCutoffRepository {
    fn snapshot(&self) -> Result<CutoffTable, RepositoryError> {
        Ok(self.table.clone())
    }
}

/// A missing path is not an error: predictions then come from the
/// institute templates.
pub(crate) fn load_table(path: Option<&Path>) -> Result<CutoffTable, AppError> {
    match path {
        Some(path) => Ok(CutoffImporter::from_path(path)?),
        None => {
            warn!("no cutoff data configured; predictions will use synthesized seats");
            Ok(CutoffTable::default())
        }
    }
}

/// Command-line path first, then `APP_CUTOFFS_PATH`.
pub(crate) fn resolve_cutoffs_path(flag: Option<PathBuf>) -> Result<Option<PathBuf>, AppError> {
    match flag {
        Some(path) => Ok(Some(path)),
        None => Ok(AppConfig::load()?.data.cutoffs_path),
    }
}
