//! Error types at the library boundary.
//!
//! The aggregation engine itself is total; these cover everything around it.

/// Failures raised by a [`crate::source::RunSource`] before aggregation starts.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Run data could not be read.
    #[error("failed to read run data from {path}: {message}")]
    Read { path: String, message: String },

    /// Run data was read but could not be decoded.
    #[error("malformed run data in {path}: {message}")]
    Malformed { path: String, message: String },

    /// The backing store failed.
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl FetchError {
    /// Wraps a store failure, keeping its whole context chain in the message.
    pub fn storage(err: &anyhow::Error) -> Self {
        Self::Storage {
            message: format!("{err:#}"),
        }
    }

    /// Exit code for CLI. Every fetch failure is an infrastructure error.
    pub fn exit_code(&self) -> i32 {
        3
    }
}

/// Failures of a whole query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The query itself is unusable.
    #[error("invalid query: {message}")]
    InvalidQuery { message: String },

    /// The run source failed. No partial summary is produced.
    #[error("fetching runs for project {project_id} seed {seed} failed: {source}")]
    Fetch {
        project_id: String,
        seed: String,
        #[source]
        source: FetchError,
    },
}

impl QueryError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidQuery { .. } => 2,
            Self::Fetch { source, .. } => source.exit_code(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config {path}: {message}")]
    Parse { path: String, message: String },

    #[error("unsupported config version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}

pub type QueryResult<T> = Result<T, QueryError>;
