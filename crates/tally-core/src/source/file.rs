//! Run records read from a JSON or YAML document on disk.

use super::{order_by_start_time, RunSource};
use crate::errors::FetchError;
use crate::model::{Run, RunRecord};
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml`/`.yml` are YAML, everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(v) => v,
            Self::One(one) => vec![one],
        }
    }
}

fn decode<T: DeserializeOwned>(raw: &str, format: DocumentFormat) -> anyhow::Result<Vec<T>> {
    let doc: OneOrMany<T> = match format {
        DocumentFormat::Json => serde_json::from_str(raw).context("failed to parse JSON")?,
        DocumentFormat::Yaml => serde_yaml::from_str(raw).context("failed to parse YAML")?,
    };
    Ok(doc.into_vec())
}

/// A single run or a list of runs, without project/seed addressing.
pub fn parse_runs(raw: &str, format: DocumentFormat) -> anyhow::Result<Vec<Run>> {
    decode(raw, format)
}

/// A single run record or a list of them.
pub fn parse_records(raw: &str, format: DocumentFormat) -> anyhow::Result<Vec<RunRecord>> {
    decode(raw, format)
}

#[derive(Debug, Clone)]
pub struct FileRunSource {
    path: PathBuf,
}

impl FileRunSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load_records(&self) -> Result<Vec<RunRecord>, FetchError> {
        let label = self.path.display().to_string();
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Read {
                path: label.clone(),
                message: e.to_string(),
            })?;
        parse_records(&raw, DocumentFormat::from_path(&self.path)).map_err(|e| {
            FetchError::Malformed {
                path: label,
                message: format!("{e:#}"),
            }
        })
    }
}

#[async_trait]
impl RunSource for FileRunSource {
    async fn fetch_runs(&self, project_id: &str, seed: &str) -> Result<Vec<Run>, FetchError> {
        let records = self.load_records().await?;
        let total = records.len();
        let mut runs: Vec<Run> = records
            .into_iter()
            .filter(|r| r.project_id == project_id && r.seed == seed)
            .map(|r| r.run)
            .collect();
        order_by_start_time(&mut runs);
        tracing::debug!(
            path = %self.path.display(),
            project_id,
            seed,
            records = total,
            matched = runs.len(),
            "loaded runs from file"
        );
        Ok(runs)
    }
}
