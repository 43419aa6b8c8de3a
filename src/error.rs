use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum RepoConcatError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
impl RepoConcatError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RepoConcatError::Io {
            path: path.into(),
            source,
        }
    }
}
