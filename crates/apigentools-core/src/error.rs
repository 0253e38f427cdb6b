//! Error taxonomy shared across apigentools crates.

use std::path::PathBuf;

/// apigentools errors.
#[derive(Debug, thiserror::Error)]
pub enum ApigentoolsError {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid config {path}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("language {0} is not configured")]
    UnknownLanguage(String),

    #[error("failed to spawn command {command}: {source}")]
    CommandSpawn {
        command: String,
        source: std::io::Error,
    },

    #[error("git error: {0}")]
    GitError(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for apigentools operations.
pub type Result<T> = std::result::Result<T, ApigentoolsError>;
