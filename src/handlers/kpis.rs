use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::{DateRange, KpiOverviewDto};
use tracing::{debug, instrument, trace};

use crate::helpers::converters::{card_to_dto, kpis_to_dto};
use crate::helpers::errors::{HandlerError, compute_error};
use crate::helpers::filters::{cache_key, filter_selection};
use crate::schemas::{ApiResponse, AppState, CachedData, ErrorResponse, ForecastQuery, KpiResponse};

/// Get the KPI snapshot and the metric cards built from it
#[utoipa::path(
    get,
    path = "/api/v1/kpis",
    tag = "kpis",
    params(ForecastQuery),
    responses(
        (status = 200, description = "KPIs retrieved successfully", body = KpiResponse),
        (status = 400, description = "Invalid filters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_kpis(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<ForecastQuery>>,
) -> Result<Json<ApiResponse<KpiOverviewDto>>, HandlerError> {
    trace!("Entering get_kpis function");
    let dashboard = state.dashboard.read().await;
    let filters = filter_selection(&query, dashboard.today())?;

    let key = cache_key("kpis", dashboard.business_type(), &filters);
    if let Some(CachedData::Kpis(overview)) = state.cache.get(&key).await {
        debug!("Serving KPIs from cache");
        return Ok(Json(ApiResponse {
            data: overview,
            message: "KPIs retrieved from cache".to_string(),
            success: true,
        }));
    }

    let kpis = dashboard.kpis(&filters).map_err(compute_error)?;
    let window_days = u32::try_from(filters.date_range.num_days()).unwrap_or(u32::MAX);
    let overview = KpiOverviewDto {
        kpis: kpis_to_dto(&kpis),
        cards: dashboard
            .metric_cards(&kpis, window_days)
            .into_iter()
            .map(card_to_dto)
            .collect(),
        range: DateRange::new(filters.date_range.from(), filters.date_range.to()),
    };
    state.cache.insert(key, CachedData::Kpis(overview.clone())).await;
    debug!("Computed KPIs: revenue {}, units {}", kpis.revenue_forecast, kpis.units_forecast);

    Ok(Json(ApiResponse {
        data: overview,
        message: "KPIs retrieved successfully".to_string(),
        success: true,
    }))
}
