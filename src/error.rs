use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum ClickUpError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Request failed with status: {status} - {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read task data from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Task data in {path} is not a mapping of owner to task list: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Upstream(#[from] ClickUpError),
}
