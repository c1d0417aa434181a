//! Catalog sources: where catalog documents come from.
//!
//! The query and statistics engines never fetch anything themselves; a
//! [`CatalogSource`] produces a [`CatalogDocument`] that callers then hand
//! to them.

mod file;
mod http;

pub use file::FileCatalogSource;
pub use http::HttpCatalogSource;

use async_trait::async_trait;
use tracing::info;

use crate::catalog::{CatalogDocument, CatalogError};
use crate::query::Criterion;

/// Something that can produce a catalog document.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short name for logs and status output.
    fn name(&self) -> &str;

    /// Fetch the catalog, optionally narrowed by a search query.
    ///
    /// Sources that cannot search ignore `query`.
    async fn fetch(&self, query: Option<&str>) -> Result<CatalogDocument, CatalogError>;
}

/// Search a source, filtering locally if the source ignored the query.
///
/// A source that returns as many products as it reports in total (or reports
/// no total at all) is assumed not to have searched. In that case the
/// document is narrowed to records whose title, author or content type
/// contains `query`, and its reported total is rewritten to match.
pub async fn search_remote(
    source: &dyn CatalogSource,
    query: &str,
) -> Result<CatalogDocument, CatalogError> {
    let query = query.trim();
    if query.is_empty() {
        return source.fetch(None).await;
    }

    let mut document = source.fetch(Some(query)).await?;
    let unfiltered = document
        .reported_total()
        .map_or(true, |total| total == document.len() as u64);

    if unfiltered {
        info!(
            "Source '{}' did not filter for '{}', filtering {} products locally",
            source.name(),
            query,
            document.len()
        );
        let keyword = Criterion::Keyword(query.to_string());
        document.retain(|record| keyword.matches(record));
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_catalog;
    use crate::testing::MockCatalogSource;

    const UNFILTERED: &str = r#"{
        "data": {
            "info": {"total": 3},
            "products": [
                {"title": "Dinosaur Songs", "author": "A"},
                {"title": "Bedtime", "author": "Dino Press"},
                {"title": "Space", "author": "C"}
            ]
        }
    }"#;

    const FILTERED: &str = r#"{
        "data": {
            "info": {"total": 40},
            "products": [{"title": "Space", "author": "C"}]
        }
    }"#;

    #[tokio::test]
    async fn test_search_filters_locally_when_source_ignores_query() {
        let source = MockCatalogSource::with_document(parse_catalog(UNFILTERED).unwrap());

        let document = search_remote(&source, "dino").await.unwrap();
        let titles: Vec<_> = document.records().iter().map(|r| r.title.as_str()).collect();

        assert_eq!(titles, vec!["Dinosaur Songs", "Bedtime"]);
        assert_eq!(document.reported_total(), Some(2));
        assert_eq!(source.recorded_queries().await, vec![Some("dino".to_string())]);
    }

    #[tokio::test]
    async fn test_search_trusts_source_that_filtered() {
        let source = MockCatalogSource::with_document(parse_catalog(FILTERED).unwrap());

        let document = search_remote(&source, "dino").await.unwrap();
        assert_eq!(document.len(), 1);
        assert_eq!(document.reported_total(), Some(40));
    }

    #[tokio::test]
    async fn test_empty_query_fetches_everything() {
        let source = MockCatalogSource::with_document(parse_catalog(UNFILTERED).unwrap());

        let document = search_remote(&source, "  ").await.unwrap();
        assert_eq!(document.len(), 3);
        assert_eq!(source.recorded_queries().await, vec![None]);
    }

    #[tokio::test]
    async fn test_search_propagates_fetch_errors() {
        let source = MockCatalogSource::new();
        source
            .fail_next(CatalogError::Http {
                status: 503,
                message: "unavailable".into(),
            })
            .await;

        let result = search_remote(&source, "dino").await;
        assert!(matches!(result, Err(CatalogError::Http { status: 503, .. })));
    }
}
