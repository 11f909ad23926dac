//! Content source collaborators.
//!
//! A content source supplies the two inputs of a generation run: the
//! realized content cache and the raw schema.

use crate::cache::Cache;
use crate::error::SourceError;
use contentgen_typegen::SourceSchema;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Options passed to [`ContentSource::fetch_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Keep watching the content for changes.
    pub watch: bool,
    /// Ignore any previously realized cache.
    pub force: bool,
}

/// Supplier of the content cache and the schema.
pub trait ContentSource: Send + Sync {
    fn fetch_data(
        &self,
        options: FetchOptions,
    ) -> impl Future<Output = Result<Cache, SourceError>> + Send;

    fn provide_schema(&self) -> impl Future<Output = Result<SourceSchema, SourceError>> + Send;
}

/// Reads the schema and an already realized cache from JSON files.
#[derive(Debug, Clone)]
pub struct JsonSource {
    schema_path: PathBuf,
    cache_path: PathBuf,
}

impl JsonSource {
    pub fn new(schema_path: impl Into<PathBuf>, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            schema_path: schema_path.into(),
            cache_path: cache_path.into(),
        }
    }

    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }
}

async fn read(path: &Path) -> Result<String, SourceError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })
}

impl ContentSource for JsonSource {
    async fn fetch_data(&self, options: FetchOptions) -> Result<Cache, SourceError> {
        if options.watch {
            warn!(
                path = %self.cache_path.display(),
                "json source cannot watch for changes, reading once"
            );
        }

        let content = read(&self.cache_path).await?;
        let cache: Cache = serde_json::from_str(&content).map_err(|source| SourceError::Parse {
            path: self.cache_path.clone(),
            source,
        })?;
        debug!(documents = cache.documents.len(), "loaded content cache");
        Ok(cache)
    }

    async fn provide_schema(&self) -> Result<SourceSchema, SourceError> {
        let content = read(&self.schema_path).await?;
        SourceSchema::from_json(&content).map_err(|source| SourceError::Parse {
            path: self.schema_path.clone(),
            source,
        })
    }
}
