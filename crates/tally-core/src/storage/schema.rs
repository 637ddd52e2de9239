/// Tables for the run tree. `*_time_ms` columns hold Unix milliseconds; sub-millisecond
/// precision is dropped on insert.
pub const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS runs (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  project_id TEXT NOT NULL,
  seed TEXT NOT NULL,
  branch TEXT NOT NULL,
  commit_sha TEXT NOT NULL,
  start_time_ms INTEGER,
  end_time_ms INTEGER,
  ingested_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS suites (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  run_id INTEGER NOT NULL REFERENCES runs(id),
  position INTEGER NOT NULL,
  name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS suite_tags (
  suite_id INTEGER NOT NULL REFERENCES suites(id),
  position INTEGER NOT NULL,
  category TEXT NOT NULL,
  value TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS specs (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  suite_id INTEGER NOT NULL REFERENCES suites(id),
  position INTEGER NOT NULL,
  name TEXT NOT NULL,
  status TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS spec_tags (
  spec_id INTEGER NOT NULL REFERENCES specs(id),
  position INTEGER NOT NULL,
  category TEXT NOT NULL,
  value TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_runs_project_seed ON runs(project_id, seed);
CREATE INDEX IF NOT EXISTS idx_suites_run ON suites(run_id);
CREATE INDEX IF NOT EXISTS idx_suite_tags_suite ON suite_tags(suite_id);
CREATE INDEX IF NOT EXISTS idx_specs_suite ON specs(suite_id);
CREATE INDEX IF NOT EXISTS idx_spec_tags_spec ON spec_tags(spec_id);
"#;
