use super::args::*;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tally_core::config::{load_config_or_default, TallyConfig, DEFAULT_CONFIG_FILE};

pub(crate) mod ingest;
pub(crate) mod seeds;
pub(crate) mod summarize;

use crate::exit_codes::EXIT_SUCCESS;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let cfg = load_cli_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Ingest(args) => ingest::run(args, &cfg),
        Command::Summarize(args) => summarize::run(args, &cfg).await,
        Command::Seeds(args) => seeds::run(args, &cfg),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(EXIT_SUCCESS)
        }
    }
}

fn load_cli_config(explicit: Option<&Path>) -> anyhow::Result<TallyConfig> {
    let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    Ok(load_config_or_default(path, explicit.is_some())?)
}

/// `--db` / `TALLY_DB` first, then the config's `database`.
pub(crate) fn resolve_db(args: &DbArgs, cfg: &TallyConfig) -> PathBuf {
    args.db.clone().unwrap_or_else(|| cfg.database.clone())
}

pub(crate) fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}
