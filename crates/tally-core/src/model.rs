//! Run trees as handed over by a [`crate::source::RunSource`].
//!
//! Everything here is a read-only snapshot: a run owns its suites, a suite owns its specs,
//! and nothing carries identity beyond its position in the tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Unix seconds of `0001-01-01T00:00:00Z`, the zero instant some producers emit
/// instead of leaving a timestamp out.
const YEAR_ONE_UNIX_SECS: i64 = -62_135_596_800;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub category: String,
    pub value: String,
}

impl Tag {
    pub fn new(category: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
        }
    }
}

/// Outcome of a single spec.
///
/// Anything outside the four known outcomes is kept verbatim in `Other` so it can still be
/// counted toward totals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpecStatus {
    Passed,
    Failed,
    Skipped,
    Pending,
    Other(String),
}

impl SpecStatus {
    /// Exact, case-sensitive match against the known outcome names.
    pub fn parse(s: &str) -> Self {
        match s {
            "passed" => Self::Passed,
            "failed" => Self::Failed,
            "skipped" => Self::Skipped,
            "pending" => Self::Pending,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Pending => "pending",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for SpecStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<SpecStatus> for String {
    fn from(s: SpecStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for SpecStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    #[serde(default)]
    pub name: String,
    pub status: SpecStatus,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Spec {
    pub fn new(status: SpecStatus, tags: Vec<Tag>) -> Self {
        Self {
            name: String::new(),
            status,
            tags,
        }
    }

    /// `category -> value` over this spec's own tags. A later tag with the same category
    /// replaces an earlier one.
    pub fn tag_map(&self) -> HashMap<&str, &str> {
        let mut map = HashMap::with_capacity(self.tags.len());
        for tag in &self.tags {
            map.insert(tag.category.as_str(), tag.value.as_str());
        }
        map
    }
}

/// Suite-level tags are carried along but never folded into spec grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub specs: Vec<Spec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    #[serde(default)]
    pub branch: String,
    #[serde(default, alias = "commitSHA")]
    pub commit_sha: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub suites: Vec<Suite>,
}

impl Run {
    pub fn spec_count(&self) -> usize {
        self.suites.iter().map(|s| s.specs.len()).sum()
    }
}

/// A run addressed by the project it belongs to and the seed that selects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub project_id: String,
    pub seed: String,
    #[serde(flatten)]
    pub run: Run,
}

/// True for timestamps that only stand in for "no time recorded". Only the year-one instant
/// counts; `1970-01-01T00:00:00Z` is a real time.
pub fn is_zero_time(ts: &DateTime<Utc>) -> bool {
    ts.timestamp_subsec_nanos() == 0 && ts.timestamp() == YEAR_ONE_UNIX_SECS
}

pub fn effective_time(ts: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    ts.filter(|t| !is_zero_time(t))
}
