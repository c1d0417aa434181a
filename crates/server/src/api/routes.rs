use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

use super::{catalog, handlers, middleware::metrics_middleware, products, stats};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let web_dir = state.config().server.web_dir.clone();

    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        // Products
        .route("/products", get(products::list_products))
        .route("/products/{id}", get(products::get_product))
        // Statistics and groupings
        .route("/stats", get(stats::get_stats))
        .route("/facets", get(stats::get_facets))
        .route("/groups/content-types", get(stats::content_type_groups))
        .route("/groups/ages", get(stats::age_groups))
        // Catalog snapshot
        .route("/catalog", get(catalog::get_catalog))
        .route("/catalog/refresh", post(catalog::refresh_catalog))
        .route_layer(middleware::from_fn(metrics_middleware))
        .with_state(state);

    // Web UI, always served fresh and readable from any origin
    let static_files = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate"),
        ))
        .service(ServeDir::new(web_dir));

    Router::new()
        .nest("/api/v1", api_routes)
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
}
