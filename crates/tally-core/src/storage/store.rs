use crate::model::{Run, Spec, SpecStatus, Suite, Tag};
use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// SQLite-backed store of run trees, addressed by `(project_id, seed)`.
#[derive(Clone)]
pub struct Store {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

/// One seed known for a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRow {
    pub seed: String,
    pub runs: u64,
    pub first_start: Option<DateTime<Utc>>,
}

struct RunHead {
    id: i64,
    branch: String,
    commit_sha: String,
    start_time_ms: Option<i64>,
    end_time_ms: Option<i64>,
}

impl Store {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open sqlite db {}", path.display()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory sqlite db")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn init_schema(&self) -> anyhow::Result<()> {
        let conn = self.lock()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(crate::storage::schema::DDL)
            .context("failed to apply schema")?;
        Ok(())
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("store connection lock poisoned"))
    }

    /// Writes a whole run tree in one transaction. Positions of suites, specs and tags are
    /// kept so the tree reads back in input order. Start and end times keep millisecond
    /// precision only.
    pub fn insert_run(&self, project_id: &str, seed: &str, run: &Run) -> anyhow::Result<i64> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO runs(project_id, seed, branch, commit_sha, start_time_ms, end_time_ms, ingested_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                project_id,
                seed,
                run.branch,
                run.commit_sha,
                run.start_time.map(|t| t.timestamp_millis()),
                run.end_time.map(|t| t.timestamp_millis()),
                Utc::now().to_rfc3339(),
            ],
        )
        .context("insert run")?;
        let run_id = tx.last_insert_rowid();

        for (suite_pos, suite) in run.suites.iter().enumerate() {
            tx.execute(
                "INSERT INTO suites(run_id, position, name) VALUES (?1, ?2, ?3)",
                params![run_id, suite_pos as i64, suite.name],
            )
            .context("insert suite")?;
            let suite_id = tx.last_insert_rowid();
            insert_tags(
                &tx,
                "INSERT INTO suite_tags(suite_id, position, category, value) VALUES (?1, ?2, ?3, ?4)",
                suite_id,
                &suite.tags,
            )?;

            for (spec_pos, spec) in suite.specs.iter().enumerate() {
                tx.execute(
                    "INSERT INTO specs(suite_id, position, name, status) VALUES (?1, ?2, ?3, ?4)",
                    params![suite_id, spec_pos as i64, spec.name, spec.status.as_str()],
                )
                .context("insert spec")?;
                let spec_id = tx.last_insert_rowid();
                insert_tags(
                    &tx,
                    "INSERT INTO spec_tags(spec_id, position, category, value) VALUES (?1, ?2, ?3, ?4)",
                    spec_id,
                    &spec.tags,
                )?;
            }
        }

        tx.commit().context("commit run")?;
        tracing::debug!(
            project_id,
            seed,
            run_id,
            suites = run.suites.len(),
            specs = run.spec_count(),
            "stored run"
        );
        Ok(run_id)
    }

    /// Runs matching `project_id` and `seed` exactly, by ascending start time. Runs without a
    /// start time come last; insertion order breaks ties.
    pub fn fetch_runs(&self, project_id: &str, seed: &str) -> anyhow::Result<Vec<Run>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, branch, commit_sha, start_time_ms, end_time_ms
             FROM runs
             WHERE project_id = ?1 AND seed = ?2
             ORDER BY start_time_ms IS NULL, start_time_ms, id",
        )?;
        let heads = stmt
            .query_map(params![project_id, seed], |row| {
                Ok(RunHead {
                    id: row.get(0)?,
                    branch: row.get(1)?,
                    commit_sha: row.get(2)?,
                    start_time_ms: row.get(3)?,
                    end_time_ms: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut runs = Vec::with_capacity(heads.len());
        for head in heads {
            runs.push(load_run(&conn, head)?);
        }
        Ok(runs)
    }

    pub fn list_seeds(&self, project_id: &str) -> anyhow::Result<Vec<SeedRow>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT seed, COUNT(*), MIN(start_time_ms)
             FROM runs
             WHERE project_id = ?1
             GROUP BY seed
             ORDER BY MIN(start_time_ms) IS NULL, MIN(start_time_ms), seed",
        )?;
        let rows = stmt
            .query_map(params![project_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(seed, runs, first_ms)| -> anyhow::Result<SeedRow> {
                Ok(SeedRow {
                    seed,
                    runs: u64::try_from(runs).context("negative run count")?,
                    first_start: millis_to_time(first_ms)?,
                })
            })
            .collect()
    }
}

fn insert_tags(conn: &Connection, sql: &str, owner_id: i64, tags: &[Tag]) -> anyhow::Result<()> {
    let mut stmt = conn.prepare_cached(sql)?;
    for (pos, tag) in tags.iter().enumerate() {
        stmt.execute(params![owner_id, pos as i64, tag.category, tag.value])
            .context("insert tag")?;
    }
    Ok(())
}

fn load_tags(conn: &Connection, sql: &str, owner_id: i64) -> anyhow::Result<Vec<Tag>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let tags = stmt
        .query_map(params![owner_id], |row| {
            Ok(Tag {
                category: row.get(0)?,
                value: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tags)
}

fn load_specs(conn: &Connection, suite_id: i64) -> anyhow::Result<Vec<Spec>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, status FROM specs WHERE suite_id = ?1 ORDER BY position, id",
    )?;
    let rows = stmt
        .query_map(params![suite_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut specs = Vec::with_capacity(rows.len());
    for (spec_id, name, status) in rows {
        specs.push(Spec {
            name,
            status: SpecStatus::parse(&status),
            tags: load_tags(
                conn,
                "SELECT category, value FROM spec_tags WHERE spec_id = ?1 ORDER BY position",
                spec_id,
            )?,
        });
    }
    Ok(specs)
}

fn load_run(conn: &Connection, head: RunHead) -> anyhow::Result<Run> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name FROM suites WHERE run_id = ?1 ORDER BY position, id",
    )?;
    let rows = stmt
        .query_map(params![head.id], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut suites = Vec::with_capacity(rows.len());
    for (suite_id, name) in rows {
        suites.push(Suite {
            name,
            tags: load_tags(
                conn,
                "SELECT category, value FROM suite_tags WHERE suite_id = ?1 ORDER BY position",
                suite_id,
            )?,
            specs: load_specs(conn, suite_id)?,
        });
    }

    Ok(Run {
        branch: head.branch,
        commit_sha: head.commit_sha,
        start_time: millis_to_time(head.start_time_ms)?,
        end_time: millis_to_time(head.end_time_ms)?,
        suites,
    })
}

fn millis_to_time(ms: Option<i64>) -> anyhow::Result<Option<DateTime<Utc>>> {
    ms.map(|ms| {
        DateTime::<Utc>::from_timestamp_millis(ms)
            .ok_or_else(|| anyhow!("stored timestamp out of range: {ms}"))
    })
    .transpose()
}
