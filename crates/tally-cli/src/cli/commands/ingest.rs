use super::super::args::IngestArgs;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::Context;
use tally_core::config::TallyConfig;
use tally_core::errors::FetchError;
use tally_core::source::file::{parse_runs, DocumentFormat};
use tally_core::storage::Store;

pub(crate) fn run(args: IngestArgs, cfg: &TallyConfig) -> anyhow::Result<i32> {
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let runs = parse_runs(&raw, DocumentFormat::from_path(&args.input))
        .with_context(|| format!("failed to load runs from {}", args.input.display()))?;

    let db = super::resolve_db(&args.db, cfg);
    super::ensure_parent_dir(&db)?;
    let store = Store::open(&db).map_err(|e| FetchError::storage(&e))?;
    store.init_schema().map_err(|e| FetchError::storage(&e))?;

    let mut specs = 0usize;
    for run in &runs {
        store
            .insert_run(&args.project, &args.seed, run)
            .map_err(|e| FetchError::storage(&e))?;
        specs += run.spec_count();
    }

    tracing::info!(
        project_id = %args.project,
        seed = %args.seed,
        runs = runs.len(),
        specs,
        db = %db.display(),
        "ingested runs"
    );
    eprintln!(
        "ingested {} run(s), {} spec(s): project={} seed={}",
        runs.len(),
        specs,
        args.project,
        args.seed
    );
    Ok(EXIT_SUCCESS)
}
