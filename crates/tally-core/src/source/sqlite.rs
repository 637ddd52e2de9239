use super::RunSource;
use crate::errors::FetchError;
use crate::model::Run;
use crate::storage::Store;
use async_trait::async_trait;
use std::path::Path;

/// [`RunSource`] over the SQLite [`Store`]. Queries run on the blocking pool.
#[derive(Clone)]
pub struct SqliteRunSource {
    store: Store,
}

impl SqliteRunSource {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Opens the database and applies the schema. Failures are storage errors, not config errors.
    pub fn open(path: &Path) -> Result<Self, FetchError> {
        let store = Store::open(path).map_err(|e| FetchError::storage(&e))?;
        store.init_schema().map_err(|e| FetchError::storage(&e))?;
        Ok(Self::new(store))
    }
}

#[async_trait]
impl RunSource for SqliteRunSource {
    async fn fetch_runs(&self, project_id: &str, seed: &str) -> Result<Vec<Run>, FetchError> {
        let store = self.store.clone();
        let (project, run_seed) = (project_id.to_string(), seed.to_string());
        let runs = tokio::task::spawn_blocking(move || store.fetch_runs(&project, &run_seed))
            .await
            .map_err(|e| FetchError::Storage {
                message: format!("store task failed: {e}"),
            })?
            .map_err(|e| FetchError::storage(&e))?;
        tracing::debug!(project_id, seed, runs = runs.len(), "fetched runs from store");
        Ok(runs)
    }
}
