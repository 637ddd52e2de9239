//! Aggregated summary returned for one query, and its wire shape.
//!
//! Internally every group carries all five counters. Zero counters are dropped only when the
//! summary is serialized.

use crate::model::SpecStatus;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Value used for a grouping category the spec carries no tag for.
pub const UNSPECIFIED: &str = "unspecified";

/// Branch and status placeholder when no run matched the query.
pub const NOT_AVAILABLE: &str = "NA";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub pending: u64,
}

impl StatusCounts {
    /// Unknown statuses only count toward `total`.
    pub fn record(&mut self, status: &SpecStatus) {
        self.total += 1;
        match status {
            SpecStatus::Passed => self.passed += 1,
            SpecStatus::Failed => self.failed += 1,
            SpecStatus::Skipped => self.skipped += 1,
            SpecStatus::Pending => self.pending += 1,
            SpecStatus::Other(_) => {}
        }
    }

    pub fn merge(&mut self, other: &StatusCounts) {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.pending += other.pending;
    }

    /// Specs that landed in one of the named buckets. Can be lower than `total`.
    pub fn bucketed(&self) -> u64 {
        self.passed + self.failed + self.skipped + self.pending
    }

    /// Counters in wire order, zero ones left out.
    pub fn non_zero(&self) -> impl Iterator<Item = (&'static str, u64)> {
        [
            ("total", self.total),
            ("passed", self.passed),
            ("failed", self.failed),
            ("skipped", self.skipped),
            ("pending", self.pending),
        ]
        .into_iter()
        .filter(|(_, n)| *n > 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallStatus {
    Passed,
    Failed,
    NotAvailable,
}

impl OverallStatus {
    pub fn from_counts(counts: &StatusCounts) -> Self {
        if counts.failed > 0 {
            Self::Failed
        } else {
            Self::Passed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::NotAvailable => NOT_AVAILABLE,
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OverallStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One partition of the specs: the resolved `(category, value)` pairs in `group_by` order,
/// plus the counters for the specs that resolved to exactly those values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupResult {
    pub values: Vec<(String, String)>,
    pub counts: StatusCounts,
}

impl GroupResult {
    pub fn value(&self, category: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum GroupField<'a> {
    Value(&'a str),
    Count(u64),
}

/// Categories first in `group_by` order, then non-zero counters. A key seen twice keeps its
/// first position and its last value, so a category named like a counter is overwritten by it.
impl Serialize for GroupResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<(&str, GroupField<'_>)> = Vec::with_capacity(self.values.len() + 5);
        for (category, value) in &self.values {
            put(&mut entries, category, GroupField::Value(value));
        }
        for (name, n) in self.counts.non_zero() {
            put(&mut entries, name, GroupField::Count(n));
        }

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, field) in &entries {
            map.serialize_entry(key, field)?;
        }
        map.end()
    }
}

fn put<'a>(entries: &mut Vec<(&'a str, GroupField<'a>)>, key: &'a str, field: GroupField<'a>) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = field,
        None => entries.push((key, field)),
    }
}

/// Response for one `(project_id, seed, group_by)` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedSummary {
    pub project_id: String,
    pub seed: String,
    pub branch: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sha: String,
    #[serde(rename = "status")]
    pub overall_status: OverallStatus,
    #[serde(rename = "tests")]
    pub spec_count: u64,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_rfc3339"
    )]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_rfc3339"
    )]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(rename = "summary")]
    pub groups: Vec<GroupResult>,
}

impl AggregatedSummary {
    /// Placeholder for a query that matched no runs.
    pub fn not_available(project_id: &str, seed: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            seed: seed.to_string(),
            branch: NOT_AVAILABLE.to_string(),
            sha: String::new(),
            overall_status: OverallStatus::NotAvailable,
            spec_count: 0,
            start_time: None,
            end_time: None,
            groups: Vec::new(),
        }
    }
}

pub fn format_rfc3339(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn serialize_rfc3339<S>(ts: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match ts {
        Some(t) => s.serialize_str(&format_rfc3339(t)),
        None => s.serialize_none(),
    }
}
