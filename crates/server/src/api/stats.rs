//! Statistics, facet and grouping API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use cardshelf_core::{
    aggregate,
    stats::{facets, group_by_content_type, group_by_starting_age, Facets},
    CatalogRecord, CatalogReport, ReportSection,
};

use super::handlers::{api_error, bad_request, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    /// Comma-separated report sections; all sections when absent.
    #[serde(default)]
    pub sections: Option<String>,
    /// Labels kept per categorical report; `[stats] top_n` when absent.
    #[serde(default)]
    pub top: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct GroupResponse<'a> {
    pub label: &'a str,
    pub count: usize,
    pub products: Vec<&'a CatalogRecord>,
}

/// GET /api/v1/stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> Result<Json<CatalogReport>, ApiError> {
    let mut options = state.aggregate_options();

    if let Some(list) = params.sections.as_deref() {
        options = options.with_sections(ReportSection::parse_list(list).map_err(bad_request)?);
    }
    if let Some(top) = params.top {
        if top == 0 {
            return Err(api_error(StatusCode::BAD_REQUEST, "top must be at least 1"));
        }
        options = options.with_top_n(top);
    }

    let snapshot = state.snapshot().await;
    Ok(Json(aggregate(&snapshot.records, &options)))
}

/// GET /api/v1/facets
pub async fn get_facets(State(state): State<Arc<AppState>>) -> Json<Facets> {
    let snapshot = state.snapshot().await;
    Json(facets(&snapshot.records))
}

/// GET /api/v1/groups/content-types
///
/// A product with several content types is listed under each of them.
pub async fn content_type_groups(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = state.snapshot().await;
    let groups = group_by_content_type(&snapshot.records);

    let body: Vec<GroupResponse> = groups
        .iter()
        .map(|(label, products)| GroupResponse {
            label,
            count: products.len(),
            products: products.clone(),
        })
        .collect();
    Json(body).into_response()
}

/// GET /api/v1/groups/ages
///
/// Partition by starting age; products without an age range are left out.
pub async fn age_groups(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = state.snapshot().await;

    let body: Vec<GroupResponse> = group_by_starting_age(&snapshot.records)
        .into_iter()
        .map(|bracket| GroupResponse {
            label: bracket.label,
            count: bracket.records.len(),
            products: bracket.records,
        })
        .collect();
    Json(body).into_response()
}
