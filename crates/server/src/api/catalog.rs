//! Catalog snapshot API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::{error, info, warn};

use cardshelf_core::save_catalog;

use super::handlers::{api_error, ApiError};
use crate::metrics::CATALOG_REFRESHES_TOTAL;
use crate::state::{AppState, CatalogInfo, CatalogSnapshot};

/// GET /api/v1/catalog
pub async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<CatalogInfo> {
    Json(state.snapshot().await.info())
}

/// POST /api/v1/catalog/refresh
///
/// Fetch the catalog from the configured source, save it to the catalog path
/// and serve it from then on. The previous snapshot stays in place if any
/// step fails.
pub async fn refresh_catalog(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CatalogInfo>, ApiError> {
    let Some(source) = state.source().cloned() else {
        return Err(api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "No catalog source configured",
        ));
    };

    info!("Refreshing catalog from '{}'", source.name());
    let document = match source.fetch(None).await {
        Ok(document) => document,
        Err(e) => {
            warn!("Catalog refresh from '{}' failed: {}", source.name(), e);
            CATALOG_REFRESHES_TOTAL
                .with_label_values(&["fetch_failed"])
                .inc();
            return Err(api_error(
                StatusCode::BAD_GATEWAY,
                format!("Failed to fetch catalog: {}", e),
            ));
        }
    };

    let path = state.config().catalog.path.clone();
    let to_save = document.clone();
    let saved = tokio::task::spawn_blocking(move || save_catalog(&path, &to_save))
        .await
        .map_err(|e| e.to_string())
        .and_then(|result| result.map_err(|e| e.to_string()));
    if let Err(e) = saved {
        error!("Failed to save refreshed catalog: {}", e);
        CATALOG_REFRESHES_TOTAL
            .with_label_values(&["save_failed"])
            .inc();
        return Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to save catalog: {}", e),
        ));
    }

    let snapshot = CatalogSnapshot::new(document, source.name());
    let info = snapshot.info();
    state.replace_catalog(snapshot).await;
    CATALOG_REFRESHES_TOTAL.with_label_values(&["success"]).inc();
    info!("Catalog refreshed: {} records", info.records);

    Ok(Json(info))
}
