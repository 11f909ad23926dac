//! Errors of a generation run.

use contentgen_typegen::SchemaError;
use std::path::PathBuf;

/// Failure to obtain the raw schema or content cache.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Any fatal error of a generation run.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize {artifact}: {source}")]
    Serialize {
        artifact: String,
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
