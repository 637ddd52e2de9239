use crate::model::{Run, Spec};
use crate::summary::{GroupResult, StatusCounts, UNSPECIFIED};
use std::collections::BTreeMap;

/// Composite grouping key: resolved tag values in `group_by` order.
///
/// Kept as a tuple of owned values so `["a|b"]` and `["a", "b"]` can never collide, and so the
/// map's ordering is the lexicographic order over the tuple.
pub type CompositeKey = Vec<String>;

/// Traversal state for one query: per-group counters plus the global tally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    group_by: Vec<String>,
    groups: BTreeMap<CompositeKey, StatusCounts>,
    overall: StatusCounts,
}

impl Aggregation {
    pub fn new(group_by: &[String]) -> Self {
        Self {
            group_by: group_by.to_vec(),
            groups: BTreeMap::new(),
            overall: StatusCounts::default(),
        }
    }

    pub fn record_run(&mut self, run: &Run) {
        for suite in &run.suites {
            for spec in &suite.specs {
                self.record_spec(spec);
            }
        }
    }

    pub fn record_spec(&mut self, spec: &Spec) {
        self.overall.record(&spec.status);
        let key = self.composite_key(spec);
        self.groups.entry(key).or_default().record(&spec.status);
    }

    pub fn composite_key(&self, spec: &Spec) -> CompositeKey {
        let tags = spec.tag_map();
        self.group_by
            .iter()
            .map(|category| {
                tags.get(category.as_str())
                    .copied()
                    .unwrap_or(UNSPECIFIED)
                    .to_string()
            })
            .collect()
    }

    /// Folds a partial aggregation built for the same `group_by` into this one.
    ///
    /// Counters are summed per identical key, so partials can be merged in any grouping.
    pub fn merge(&mut self, other: Aggregation) {
        debug_assert_eq!(self.group_by, other.group_by, "merge across different group_by");
        self.overall.merge(&other.overall);
        for (key, counts) in other.groups {
            self.groups.entry(key).or_default().merge(&counts);
        }
    }

    pub fn overall(&self) -> &StatusCounts {
        &self.overall
    }

    pub fn spec_count(&self) -> u64 {
        self.overall.total
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Groups ordered by their value tuple, first category as primary key.
    pub fn into_groups(self) -> Vec<GroupResult> {
        let group_by = self.group_by;
        self.groups
            .into_iter()
            .map(|(key, counts)| GroupResult {
                values: group_by.iter().cloned().zip(key).collect(),
                counts,
            })
            .collect()
    }
}
