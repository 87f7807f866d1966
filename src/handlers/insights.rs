use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::InsightDto;
use tracing::{debug, instrument};

use crate::helpers::converters::insight_to_dto;
use crate::helpers::errors::HandlerError;
use crate::helpers::filters::filter_selection;
use crate::schemas::{ApiResponse, AppState, ErrorResponse, ForecastQuery, InsightsResponse};

/// Get the insight events overlapping the requested range
#[utoipa::path(
    get,
    path = "/api/v1/insights",
    tag = "insights",
    params(ForecastQuery),
    responses(
        (status = 200, description = "Insights retrieved successfully", body = InsightsResponse),
        (status = 400, description = "Invalid filters", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_insights(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<ForecastQuery>>,
) -> Result<Json<ApiResponse<Vec<InsightDto>>>, HandlerError> {
    let dashboard = state.dashboard.read().await;
    let filters = filter_selection(&query, dashboard.today())?;

    let insights: Vec<InsightDto> = dashboard
        .insights()
        .into_iter()
        .filter(|event| event.overlaps(&filters.date_range))
        .map(insight_to_dto)
        .collect();
    debug!("{} insights overlap the range", insights.len());

    Ok(Json(ApiResponse {
        data: insights,
        message: "Insights retrieved successfully".to_string(),
        success: true,
    }))
}
