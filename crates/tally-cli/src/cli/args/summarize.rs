use super::common::{DbArgs, OutputFormat};
use std::path::PathBuf;

#[derive(clap::Args, Clone, Debug, Default)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub db: DbArgs,

    /// Read run records from a JSON/YAML file instead of the store (takes precedence over --db)
    #[arg(long)]
    pub from_file: Option<PathBuf>,

    /// URL-encoded query, e.g. "project_id=shop&seed=b7&group_by=component".
    /// Explicit flags take precedence over its fields.
    #[arg(long)]
    pub query: Option<String>,

    #[arg(long)]
    pub project: Option<String>,

    #[arg(long)]
    pub seed: Option<String>,

    /// Tag category to group by; repeat for composite groups (order matters)
    #[arg(long = "group-by", value_name = "CATEGORY")]
    pub group_by: Vec<String>,

    /// Ignore `default_group_by` from the config and aggregate all specs into one group
    #[arg(long, conflicts_with = "group_by")]
    pub ungrouped: bool,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Also write the JSON summary to this file
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Print the content tag of the JSON summary to stderr
    #[arg(long)]
    pub etag: bool,

    /// Exit with 1 when the overall status is "failed"
    #[arg(long)]
    pub fail_on_failed: bool,
}
