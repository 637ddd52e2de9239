//! Query shape and the fetch-then-summarize path that ties a source to the engine.

use crate::engine::summarize;
use crate::errors::{QueryError, QueryResult};
use crate::source::RunSource;
use crate::summary::AggregatedSummary;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub project_id: String,
    pub run_seed: String,
    /// Order matters: it fixes both the composite key and the output key order.
    pub group_by: Vec<String>,
}

impl Query {
    pub fn new(project_id: impl Into<String>, run_seed: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            run_seed: run_seed.into(),
            group_by: Vec::new(),
        }
    }

    pub fn group_by<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Builds a query from an URL-encoded query string such as
    /// `project_id=p&seed=s&group_by=component&group_by=priority`.
    ///
    /// `group_by` may repeat (also accepted as `groupBy`); repetitions keep their order.
    /// A repeated `project_id` or `seed` keeps the last value. Unknown keys are ignored.
    pub fn from_query_string(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut query = Query::default();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "project_id" | "projectID" => query.project_id = value.into_owned(),
                "seed" => query.run_seed = value.into_owned(),
                "group_by" | "groupBy" => query.group_by.push(value.into_owned()),
                _ => {}
            }
        }
        query
    }

    pub fn validate(&self) -> QueryResult<()> {
        if self.project_id.is_empty() {
            return Err(QueryError::invalid("project_id must not be empty"));
        }
        if self.run_seed.is_empty() {
            return Err(QueryError::invalid("seed must not be empty"));
        }
        if self.group_by.iter().any(String::is_empty) {
            return Err(QueryError::invalid("group_by category must not be empty"));
        }
        Ok(())
    }
}

/// Fetches the runs for `query` and aggregates them.
///
/// A failing source fails the whole query. A source that returns no runs is not a failure and
/// yields the `"NA"` placeholder summary.
pub async fn summarize_query(
    source: &dyn RunSource,
    query: &Query,
) -> QueryResult<AggregatedSummary> {
    query.validate()?;

    let runs = source
        .fetch_runs(&query.project_id, &query.run_seed)
        .await
        .map_err(|source| QueryError::Fetch {
            project_id: query.project_id.clone(),
            seed: query.run_seed.clone(),
            source,
        })?;

    if runs.is_empty() {
        tracing::info!(
            project_id = %query.project_id,
            seed = %query.run_seed,
            "no runs matched"
        );
    }

    Ok(summarize(
        &runs,
        &query.project_id,
        &query.run_seed,
        &query.group_by,
    ))
}
