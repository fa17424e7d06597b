use crate::catalog::models::{CatalogFile, RoundDefinition};
use crate::imagery::errors::ImageryError;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod cities;
pub mod sampling;
pub mod urls;
#[cfg(test)]
pub mod tests;

#[derive(Debug, Error)]
pub enum AuthoringError {
    #[error("can't access `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("can't serialize the catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no valid URLs found")]
    NoValidUrls,
    #[error("imagery provider failed: {0}")]
    Imagery(#[from] ImageryError),
}

/// Writes `rounds` as a pretty-printed `{"locations": [...]}` document, creating parent
/// directories as needed.
pub async fn write_catalog(
    path: &Path,
    rounds: Vec<RoundDefinition>,
) -> Result<(), AuthoringError> {
    let io_error = |source| AuthoringError::Io {
        path: path.to_path_buf(),
        source,
    };
    let body = serde_json::to_string_pretty(&CatalogFile { locations: rounds })?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    tokio::fs::write(path, body).await.map_err(io_error)
}
