use super::common::{DbArgs, OutputFormat};
use std::path::PathBuf;

#[derive(clap::Args, Clone, Debug)]
pub struct IngestArgs {
    #[command(flatten)]
    pub db: DbArgs,

    #[arg(long)]
    pub project: String,

    #[arg(long)]
    pub seed: String,

    /// A single run or a list of runs (.json, .yaml or .yml)
    pub input: PathBuf,
}

#[derive(clap::Args, Clone, Debug)]
pub struct SeedsArgs {
    #[command(flatten)]
    pub db: DbArgs,

    #[arg(long)]
    pub project: String,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}
