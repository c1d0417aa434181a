//! Product query API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::debug;

use cardshelf_core::{run_query, CatalogRecord, Query as CatalogQuery, SortKey};

use super::handlers::{api_error, bad_request, ApiError};
use crate::metrics::QUERY_MATCHES;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProductListResponse<'a> {
    /// Records in the catalog.
    pub total: usize,
    /// Records matching the filters, before `limit`.
    pub matched: usize,
    pub products: Vec<&'a CatalogRecord>,
}

/// GET /api/v1/products
///
/// Filter, sort and limit the catalog. Every query parameter must be a known
/// filter name or one of `sort`, `reverse`, `limit`. Results are sorted by
/// title unless `sort` says otherwise.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let mut query = CatalogQuery::from_pairs(params).map_err(bad_request)?;
    if query.sort.is_none() {
        query.sort = Some(SortKey::Title);
    }

    let snapshot = state.snapshot().await;
    let result = run_query(&snapshot.records, &query);
    QUERY_MATCHES.observe(result.matched as f64);
    debug!(
        matched = result.matched,
        returned = result.records.len(),
        "Served product query"
    );

    Ok(Json(ProductListResponse {
        total: snapshot.records.len(),
        matched: result.matched,
        products: result.records,
    })
    .into_response())
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CatalogRecord>, ApiError> {
    let snapshot = state.snapshot().await;

    snapshot
        .records
        .iter()
        .find(|record| record.id.as_deref() == Some(id.as_str()))
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Product not found: {}", id)))
}
