use chrono::NaiveDate;
use common::{
    DateRange, InsightDto, ItemDto, KpiDto, KpiOverviewDto, MetricCardDto, ProfileDto, PromoToggleDto,
    ScenarioPreviewDto, SeriesDto, SeriesPointDto, TopItemsPage,
};
use compute::{ForecastDashboard, ItemSort};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::Validate;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Session service; promo toggles and profile switches take the write lock
    pub dashboard: Arc<RwLock<ForecastDashboard>>,
    /// Cache for series and KPI responses
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Series(SeriesDto),
    Kpis(KpiOverviewDto),
}

/// Filter parameters shared by the series, KPI and insight endpoints
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ForecastQuery {
    /// First day of the range (YYYY-MM-DD), defaults to a week before today
    pub from: Option<NaiveDate>,
    /// Last day of the range (YYYY-MM-DD), defaults to the end of `window`
    pub to: Option<NaiveDate>,
    /// Forecast window in days (7, 14 or 28), used when `to` is absent
    #[validate(range(min = 7, max = 28))]
    pub window: Option<u32>,
    /// Comma separated store names, or `all`
    #[validate(length(max = 512))]
    pub stores: Option<String>,
    /// Comma separated department names, or `all`
    #[validate(length(max = 512))]
    pub departments: Option<String>,
    /// Item name search term
    #[validate(length(max = 100))]
    pub search: Option<String>,
    /// Attach "explain changes" annotations
    pub explain: Option<bool>,
}

/// Parameters of the top items table
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ItemsQuery {
    /// Page number, starting at 1; pages outside the table come back empty
    pub page: Option<usize>,
    /// Rows per page (default 8)
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<usize>,
    /// One of `default`, `revenue_desc`, `units_desc`, `name`, `price_asc`
    #[schema(value_type = Option<String>)]
    #[param(value_type = Option<String>)]
    pub sort: Option<ItemSort>,
    /// Item name search term
    #[validate(length(max = 100))]
    pub search: Option<String>,
    /// Comma separated department names, or `all`
    #[validate(length(max = 512))]
    pub departments: Option<String>,
}

/// Request body of the scenario preview
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct ScenarioRequest {
    /// Extra demand in percent, 0 to 25
    #[validate(range(max = 25))]
    pub lift_percent: u32,
}

/// Request body switching the business profile
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateProfileRequest {
    /// `convenience`, `grocery`, `liquor` or `restaurant`
    #[validate(length(min = 1, max = 32))]
    pub business_type: String,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
#[aliases(
    SeriesResponse = ApiResponse<SeriesDto>,
    KpiResponse = ApiResponse<KpiOverviewDto>,
    ItemsResponse = ApiResponse<TopItemsPage>,
    PromoResponse = ApiResponse<PromoToggleDto>,
    ScenarioResponse = ApiResponse<ScenarioPreviewDto>,
    InsightsResponse = ApiResponse<Vec<InsightDto>>,
    ProfileResponse = ApiResponse<ProfileDto>,
)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Active business type
    pub business_type: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::series::get_revenue_series,
        crate::handlers::series::get_units_series,
        crate::handlers::kpis::get_kpis,
        crate::handlers::items::get_top_items,
        crate::handlers::items::toggle_item_promo,
        crate::handlers::items::preview_item_scenario,
        crate::handlers::insights::get_insights,
        crate::handlers::profile::get_profile,
        crate::handlers::profile::update_profile,
    ),
    components(
        schemas(
            SeriesResponse,
            KpiResponse,
            ItemsResponse,
            PromoResponse,
            ScenarioResponse,
            InsightsResponse,
            ProfileResponse,
            ErrorResponse,
            HealthResponse,
            ForecastQuery,
            ItemsQuery,
            ScenarioRequest,
            UpdateProfileRequest,
            SeriesDto,
            SeriesPointDto,
            DateRange,
            KpiOverviewDto,
            KpiDto,
            MetricCardDto,
            TopItemsPage,
            ItemDto,
            PromoToggleDto,
            ScenarioPreviewDto,
            InsightDto,
            ProfileDto,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "series", description = "Daily revenue and units series"),
        (name = "kpis", description = "KPI cards"),
        (name = "items", description = "Top items table, promo toggles and scenarios"),
        (name = "insights", description = "Insight events"),
        (name = "profile", description = "Business profile selection"),
    ),
    info(
        title = "Demandcast API",
        description = "Demand forecasting dashboard API backed by deterministic mock data",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
