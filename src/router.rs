use crate::handlers::{
    health::health_check,
    insights::get_insights,
    items::{get_top_items, preview_item_scenario, toggle_item_promo},
    kpis::get_kpis,
    profile::{get_profile, update_profile},
    series::{get_revenue_series, get_units_series},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Charts
        .route("/api/v1/series/revenue", get(get_revenue_series))
        .route("/api/v1/series/units", get(get_units_series))
        // KPI cards
        .route("/api/v1/kpis", get(get_kpis))
        // Top items table
        .route("/api/v1/items", get(get_top_items))
        .route("/api/v1/items/:item_id/promo", post(toggle_item_promo))
        .route("/api/v1/items/:item_id/scenario", post(preview_item_scenario))
        // Insights panel
        .route("/api/v1/insights", get(get_insights))
        // Business profile
        .route("/api/v1/profile", get(get_profile).put(update_profile))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
