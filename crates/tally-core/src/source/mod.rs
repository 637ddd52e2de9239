//! Data fetchers: where run trees come from.
//!
//! The engine never sees these; it only consumes the `Vec<Run>` they return.

pub mod file;
pub mod sqlite;

pub use file::FileRunSource;
pub use sqlite::SqliteRunSource;

use crate::errors::FetchError;
use crate::model::Run;
use async_trait::async_trait;

#[async_trait]
pub trait RunSource: Send + Sync {
    /// All runs of `project_id` whose identifier equals `seed`, ordered by start time.
    /// An empty vector means "no data", which is not an error.
    async fn fetch_runs(&self, project_id: &str, seed: &str) -> Result<Vec<Run>, FetchError>;
}

/// Stable sort by start time; runs without a start time go last in their original order.
pub(crate) fn order_by_start_time(runs: &mut [Run]) {
    runs.sort_by_key(|r| (r.start_time.is_none(), r.start_time));
}
