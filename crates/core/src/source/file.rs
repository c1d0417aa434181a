//! Catalog source backed by a JSON file on disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::CatalogSource;
use crate::catalog::{parse_catalog, CatalogDocument, CatalogError};

/// Reads the catalog from a local file. Ignores search queries.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self, query: Option<&str>) -> Result<CatalogDocument, CatalogError> {
        if let Some(query) = query {
            debug!("File source ignores query '{}'", query);
        }
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::Io {
                path: self.path.display().to_string(),
                source: e,
            })?;
        parse_catalog(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_fetch_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"data": {{"products": [{{"title": "Moana"}}, {{"title": "Frozen"}}]}}}}"#
        )
        .unwrap();

        let source = FileCatalogSource::new(file.path());
        let document = source.fetch(Some("ignored")).await.unwrap();
        assert_eq!(document.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = FileCatalogSource::new("/nonexistent/catalog.json");
        let result = source.fetch(None).await;
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
