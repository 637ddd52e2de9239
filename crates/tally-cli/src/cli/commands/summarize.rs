use super::super::args::{OutputFormat, SummarizeArgs};
use crate::exit_codes::{EXIT_INFRA_ERROR, EXIT_STATUS_FAILED, EXIT_SUCCESS};
use tally_core::config::TallyConfig;
use tally_core::report::{console, etag, json};
use tally_core::source::{FileRunSource, RunSource, SqliteRunSource};
use tally_core::summary::OverallStatus;
use tally_core::{summarize_query, Query};

pub(crate) async fn run(args: SummarizeArgs, cfg: &TallyConfig) -> anyhow::Result<i32> {
    let query = build_query(&args, cfg);

    let source: Box<dyn RunSource> = match &args.from_file {
        Some(path) => Box::new(FileRunSource::new(path)),
        None => {
            let db = super::resolve_db(&args.db, cfg);
            if !db.exists() {
                eprintln!(
                    "error: database not found: {} (load runs with `tally ingest` first)",
                    db.display()
                );
                return Ok(EXIT_INFRA_ERROR);
            }
            match SqliteRunSource::open(&db) {
                Ok(source) => Box::new(source),
                Err(e) => {
                    eprintln!("error: {e}");
                    return Ok(e.exit_code());
                }
            }
        }
    };

    let summary = match summarize_query(source.as_ref(), &query).await {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(e.exit_code());
        }
    };

    match args.format.unwrap_or_else(|| cfg.output.into()) {
        OutputFormat::Json => println!("{}", json::to_json(&summary, true)?),
        OutputFormat::Text => print!("{}", console::render_text(&summary)),
    }
    if let Some(out) = &args.out {
        super::ensure_parent_dir(out)?;
        json::write_json(&summary, out)?;
    }
    if args.etag {
        eprintln!("etag: {}", etag::summary_etag(&summary)?);
    }

    if args.fail_on_failed && summary.overall_status == OverallStatus::Failed {
        return Ok(EXIT_STATUS_FAILED);
    }
    Ok(EXIT_SUCCESS)
}

/// `--query` string first, explicit flags on top, config default for grouping last.
fn build_query(args: &SummarizeArgs, cfg: &TallyConfig) -> Query {
    let mut query = args
        .query
        .as_deref()
        .map(Query::from_query_string)
        .unwrap_or_default();
    if let Some(project) = &args.project {
        query.project_id = project.clone();
    }
    if let Some(seed) = &args.seed {
        query.run_seed = seed.clone();
    }
    if args.ungrouped {
        query.group_by.clear();
    } else if !args.group_by.is_empty() {
        query.group_by = args.group_by.clone();
    } else if query.group_by.is_empty() {
        query.group_by = cfg.default_group_by.clone();
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg_with_default(cats: &[&str]) -> TallyConfig {
        TallyConfig {
            default_group_by: cats.iter().map(|c| c.to_string()).collect(),
            ..TallyConfig::default()
        }
    }

    #[test]
    fn flags_override_query_string() {
        let args = SummarizeArgs {
            query: Some("project_id=a&seed=s1&group_by=team".into()),
            seed: Some("s2".into()),
            group_by: vec!["component".into()],
            ..Default::default()
        };
        let q = build_query(&args, &cfg_with_default(&["priority"]));
        assert_eq!(q.project_id, "a");
        assert_eq!(q.run_seed, "s2");
        assert_eq!(q.group_by, vec!["component"]);
    }

    #[test]
    fn config_default_applies_only_without_grouping() {
        let cfg = cfg_with_default(&["priority"]);
        let args = SummarizeArgs {
            project: Some("p".into()),
            seed: Some("s".into()),
            ..Default::default()
        };
        assert_eq!(build_query(&args, &cfg).group_by, vec!["priority"]);

        let from_query = SummarizeArgs {
            query: Some("group_by=team".into()),
            ..args.clone()
        };
        assert_eq!(build_query(&from_query, &cfg).group_by, vec!["team"]);

        let ungrouped = SummarizeArgs {
            ungrouped: true,
            ..args
        };
        assert!(build_query(&ungrouped, &cfg).group_by.is_empty());
    }
}
