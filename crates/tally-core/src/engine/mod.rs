//! Aggregation engine: one pass over a materialized run sequence.
//!
//! Pure and synchronous. Nothing here performs I/O or fails; malformed input is handled by the
//! substitution and omission rules of [`Aggregation`] and [`crate::model::effective_time`].

pub mod aggregation;

pub use aggregation::{Aggregation, CompositeKey};

use crate::model::{effective_time, Run};
use crate::summary::{AggregatedSummary, OverallStatus};

/// Partitions every spec of `runs` by the tag values of `group_by` and rolls up status counts.
///
/// Branch and commit come from the first run, `start_time` from the first run and `end_time`
/// from the last one. An empty `runs` yields the `"NA"` placeholder.
pub fn summarize(
    runs: &[Run],
    project_id: &str,
    seed: &str,
    group_by: &[String],
) -> AggregatedSummary {
    let (Some(first), Some(last)) = (runs.first(), runs.last()) else {
        return AggregatedSummary::not_available(project_id, seed);
    };

    let mut agg = Aggregation::new(group_by);
    for run in runs {
        agg.record_run(run);
    }

    let overall_status = OverallStatus::from_counts(agg.overall());
    let spec_count = agg.spec_count();
    tracing::debug!(
        project_id,
        seed,
        runs = runs.len(),
        specs = spec_count,
        groups = agg.group_count(),
        status = overall_status.as_str(),
        "summarized runs"
    );

    AggregatedSummary {
        project_id: project_id.to_string(),
        seed: seed.to_string(),
        branch: first.branch.clone(),
        sha: first.commit_sha.clone(),
        overall_status,
        spec_count,
        start_time: effective_time(first.start_time),
        end_time: effective_time(last.end_time),
        groups: agg.into_groups(),
    }
}
