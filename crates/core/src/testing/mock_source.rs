//! Mock catalog source for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::{CatalogDocument, CatalogError, CatalogRecord};
use crate::source::CatalogSource;

/// Mock implementation of the CatalogSource trait.
///
/// Provides controllable behavior for testing:
/// - Return a configurable document
/// - Track fetch queries for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use cardshelf_core::testing::{MockCatalogSource, fixtures};
///
/// let source = MockCatalogSource::with_records(fixtures::sample_catalog());
/// let document = source.fetch(Some("moana")).await?;
///
/// assert_eq!(source.recorded_queries().await, vec![Some("moana".to_string())]);
/// ```
#[derive(Debug, Clone)]
pub struct MockCatalogSource {
    /// Document returned by every successful fetch.
    document: Arc<RwLock<CatalogDocument>>,
    /// Queries passed to fetch, in order.
    queries: Arc<RwLock<Vec<Option<String>>>>,
    /// If set, the next fetch will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
}

impl Default for MockCatalogSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalogSource {
    /// Create a mock source returning an empty catalog.
    pub fn new() -> Self {
        Self::with_document(CatalogDocument::from_records(Vec::new()))
    }

    /// Create a mock source returning `document`.
    pub fn with_document(document: CatalogDocument) -> Self {
        Self {
            document: Arc::new(RwLock::new(document)),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a mock source returning a document built from `records`.
    pub fn with_records(records: Vec<CatalogRecord>) -> Self {
        Self::with_document(CatalogDocument::from_records(records))
    }

    /// Replace the document returned by later fetches.
    pub async fn set_document(&self, document: CatalogDocument) {
        *self.document.write().await = document;
    }

    /// Make the next fetch fail with `error`.
    pub async fn fail_next(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Queries seen so far.
    pub async fn recorded_queries(&self) -> Vec<Option<String>> {
        self.queries.read().await.clone()
    }
}

#[async_trait]
impl CatalogSource for MockCatalogSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, query: Option<&str>) -> Result<CatalogDocument, CatalogError> {
        self.queries.write().await.push(query.map(str::to_string));

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        Ok(self.document.read().await.clone())
    }
}
