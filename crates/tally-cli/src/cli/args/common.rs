//! Shared argument types used across multiple commands.

use clap::ValueEnum;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<tally_core::config::OutputFormat> for OutputFormat {
    fn from(f: tally_core::config::OutputFormat) -> Self {
        match f {
            tally_core::config::OutputFormat::Text => Self::Text,
            tally_core::config::OutputFormat::Json => Self::Json,
        }
    }
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct DbArgs {
    /// SQLite store (overrides `database` from the config file)
    #[arg(long, env = "TALLY_DB")]
    pub db: Option<std::path::PathBuf>,
}
