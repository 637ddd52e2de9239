pub mod config;
pub mod engine;
pub mod errors;
pub mod model;
pub mod query;
pub mod report;
pub mod source;
pub mod storage;
pub mod summary;

pub use engine::summarize;
pub use model::{Run, RunRecord, Spec, SpecStatus, Suite, Tag};
pub use query::{summarize_query, Query};
pub use summary::{AggregatedSummary, GroupResult, OverallStatus, StatusCounts};
