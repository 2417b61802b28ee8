//! Error types for the analyzer and individual checks.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
/// Errors that stop an analysis run.
pub enum AnalyzeError {
    #[error("Cannot open the indicated charm file '{}': {cause}.", .path.display())]
    ArtifactUnreadable { path: PathBuf, cause: String },

    #[error("Cannot access the indicated file '{}'.", .path.display())]
    InaccessibleFile { path: PathBuf },

    #[error("Unknown output format '{0}'; expected 'unformatted' or 'json'.")]
    UnknownRenderMode(String),

    #[error("Invalid configuration in '{}': {cause}", .path.display())]
    InvalidConfig { path: PathBuf, cause: String },

    #[error("Invalid value {value:?} for environment variable {name}")]
    InvalidEnv { name: String, value: String },

    #[error("Check name must not be empty")]
    EmptyCheckName,

    #[error("Cannot encode report: {0}")]
    Render(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
/// Failure while executing a single check. Recovered by the runner.
pub enum CheckError {
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse '{}': {source}", .path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("{0}")]
    Failed(String),
}
