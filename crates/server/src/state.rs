use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use cardshelf_core::{
    stats::AggregateOptions, CatalogDocument, CatalogRecord, CatalogSource, Config,
    SanitizedConfig,
};

use crate::metrics::CATALOG_RECORDS;

/// The catalog as last loaded.
///
/// Cloning is cheap: records are shared behind an `Arc`, so handlers can take
/// a snapshot and release the lock before running queries.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub records: Arc<Vec<CatalogRecord>>,
    /// `data.info.total` from the source document, if it had one.
    pub reported_total: Option<u64>,
    pub loaded_at: DateTime<Utc>,
    /// Where the records came from (a file path or a source name).
    pub origin: String,
}

impl CatalogSnapshot {
    pub fn new(document: CatalogDocument, origin: impl Into<String>) -> Self {
        let reported_total = document.reported_total();
        Self {
            records: Arc::new(document.into_records()),
            reported_total,
            loaded_at: Utc::now(),
            origin: origin.into(),
        }
    }

    pub fn info(&self) -> CatalogInfo {
        CatalogInfo {
            records: self.records.len(),
            reported_total: self.reported_total,
            loaded_at: self.loaded_at,
            origin: self.origin.clone(),
        }
    }
}

/// Snapshot summary for the API.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogInfo {
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_total: Option<u64>,
    pub loaded_at: DateTime<Utc>,
    pub origin: String,
}

/// Shared application state
pub struct AppState {
    config: Config,
    catalog: RwLock<CatalogSnapshot>,
    source: Option<Arc<dyn CatalogSource>>,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: CatalogSnapshot,
        source: Option<Arc<dyn CatalogSource>>,
    ) -> Self {
        CATALOG_RECORDS.set(catalog.records.len() as i64);
        Self {
            config,
            catalog: RwLock::new(catalog),
            source,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    /// The source used for refreshes, if one is configured.
    pub fn source(&self) -> Option<&Arc<dyn CatalogSource>> {
        self.source.as_ref()
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.catalog.read().await.clone()
    }

    /// Swap in a freshly loaded catalog.
    pub async fn replace_catalog(&self, catalog: CatalogSnapshot) {
        CATALOG_RECORDS.set(catalog.records.len() as i64);
        *self.catalog.write().await = catalog;
    }

    /// Aggregation defaults from the `[stats]` section.
    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions::default()
            .with_top_n(self.config.stats.top_n)
            .with_age_bands(self.config.stats.age_bands.clone())
    }
}
