use super::super::args::{OutputFormat, SeedsArgs};
use crate::exit_codes::{EXIT_INFRA_ERROR, EXIT_SUCCESS};
use tally_core::config::TallyConfig;
use tally_core::errors::FetchError;
use tally_core::storage::Store;
use tally_core::summary::format_rfc3339;

pub(crate) fn run(args: SeedsArgs, cfg: &TallyConfig) -> anyhow::Result<i32> {
    let db = super::resolve_db(&args.db, cfg);
    if !db.exists() {
        eprintln!("error: database not found: {}", db.display());
        return Ok(EXIT_INFRA_ERROR);
    }
    let seeds = Store::open(&db)
        .and_then(|store| {
            store.init_schema()?;
            store.list_seeds(&args.project)
        })
        .map_err(|e| FetchError::storage(&e))?;

    match args.format.unwrap_or_else(|| cfg.output.into()) {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = seeds
                .iter()
                .map(|s| {
                    let mut row = serde_json::json!({ "seed": s.seed, "runs": s.runs });
                    if let Some(t) = &s.first_start {
                        row["first_start"] = serde_json::Value::String(format_rfc3339(t));
                    }
                    row
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Text => {
            if seeds.is_empty() {
                println!("no seeds for project {}", args.project);
            }
            for s in &seeds {
                let started = s
                    .first_start
                    .as_ref()
                    .map(format_rfc3339)
                    .unwrap_or_else(|| "-".to_string());
                println!("{}  runs={}  first_start={}", s.seed, s.runs, started);
            }
        }
    }
    Ok(EXIT_SUCCESS)
}
