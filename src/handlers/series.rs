use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::SeriesDto;
use model::Metric;
use tracing::{debug, instrument, trace};

use crate::helpers::converters::series_to_dto;
use crate::helpers::errors::{HandlerError, compute_error};
use crate::helpers::filters::{cache_key, filter_selection};
use crate::schemas::{ApiResponse, AppState, CachedData, ErrorResponse, ForecastQuery, SeriesResponse};

async fn build_series(
    state: &AppState,
    metric: Metric,
    query: &ForecastQuery,
) -> Result<Json<ApiResponse<SeriesDto>>, HandlerError> {
    trace!("Building {} series for {:?}", metric, query);
    let dashboard = state.dashboard.read().await;
    let filters = filter_selection(query, dashboard.today())?;

    let key = cache_key(&format!("series_{}", metric), dashboard.business_type(), &filters);
    if let Some(CachedData::Series(series)) = state.cache.get(&key).await {
        debug!("Serving {} series from cache", metric);
        return Ok(Json(ApiResponse {
            data: series,
            message: format!("{} series retrieved from cache", metric),
            success: true,
        }));
    }

    let points = dashboard.series(metric, &filters).map_err(compute_error)?;
    let series = series_to_dto(metric, &filters, dashboard.filter_multiplier(&filters), points);
    state.cache.insert(key, CachedData::Series(series.clone())).await;
    debug!("Computed {} series with {} points", metric, series.points.len());

    Ok(Json(ApiResponse {
        data: series,
        message: format!("{} series retrieved successfully", metric),
        success: true,
    }))
}

/// Get the daily revenue series
#[utoipa::path(
    get,
    path = "/api/v1/series/revenue",
    tag = "series",
    params(ForecastQuery),
    responses(
        (status = 200, description = "Revenue series retrieved successfully", body = SeriesResponse),
        (status = 400, description = "Invalid filters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_revenue_series(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<ForecastQuery>>,
) -> Result<Json<ApiResponse<SeriesDto>>, HandlerError> {
    build_series(&state, Metric::Revenue, &query).await
}

/// Get the daily units series
#[utoipa::path(
    get,
    path = "/api/v1/series/units",
    tag = "series",
    params(ForecastQuery),
    responses(
        (status = 200, description = "Units series retrieved successfully", body = SeriesResponse),
        (status = 400, description = "Invalid filters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_units_series(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<ForecastQuery>>,
) -> Result<Json<ApiResponse<SeriesDto>>, HandlerError> {
    build_series(&state, Metric::Units, &query).await
}
