use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod common;
pub mod ingest;
pub mod summarize;
pub use common::*;
pub use ingest::*;
pub use summarize::*;


#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Tag-grouped pass/fail rollups over hierarchical test runs"
)]
pub struct Cli {
    /// Config file (defaults to tally.yaml when present)
    #[arg(long, global = true, env = "TALLY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load run trees from a JSON/YAML file into the store
    Ingest(IngestArgs),
    /// Aggregate the runs of one seed, grouped by tag categories
    Summarize(SummarizeArgs),
    /// List the seeds stored for a project
    Seeds(SeedsArgs),
    Version,
}
