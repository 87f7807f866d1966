use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use axum_valid::Valid;
use common::{PromoToggleDto, ScenarioPreviewDto, TopItemsPage};
use tracing::{debug, info, instrument, trace};

use crate::helpers::converters::{page_to_dto, promo_to_dto, scenario_to_dto};
use crate::helpers::errors::{HandlerError, compute_error};
use crate::helpers::filters::item_selection;
use crate::schemas::{
    ApiResponse, AppState, ErrorResponse, ItemsQuery, ItemsResponse, PromoResponse, ScenarioRequest,
    ScenarioResponse,
};

/// Rows per page when the client does not ask for a size.
const DEFAULT_PER_PAGE: usize = 8;

/// Get one page of the top items table
#[utoipa::path(
    get,
    path = "/api/v1/items",
    tag = "items",
    params(ItemsQuery),
    responses(
        (status = 200, description = "Items retrieved successfully", body = ItemsResponse),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_top_items(
    State(state): State<AppState>,
    Valid(Query(query)): Valid<Query<ItemsQuery>>,
) -> Result<Json<ApiResponse<TopItemsPage>>, HandlerError> {
    trace!("Entering get_top_items function");
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE);
    let sort = query.sort.unwrap_or_default();

    let dashboard = state.dashboard.read().await;
    let filters = item_selection(&query, dashboard.today());
    let result = dashboard.top_items(page, per_page, sort, &filters);
    debug!("Item page {} holds {} of {} matches", page, result.items.len(), result.total);

    Ok(Json(ApiResponse {
        data: page_to_dto(result, page, per_page),
        message: "Items retrieved successfully".to_string(),
        success: true,
    }))
}

/// Toggle the promotion flag of an item
#[utoipa::path(
    post,
    path = "/api/v1/items/{item_id}/promo",
    tag = "items",
    params(
        ("item_id" = String, Path, description = "Item ID"),
    ),
    responses(
        (status = 200, description = "Promo toggled", body = PromoResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn toggle_item_promo(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<ApiResponse<PromoToggleDto>>, HandlerError> {
    trace!("Entering toggle_item_promo function");
    let is_promo_active = {
        let mut dashboard = state.dashboard.write().await;
        dashboard.toggle_promo(&item_id).map_err(compute_error)?
    };
    info!("Item {} promo set to {}", item_id, is_promo_active);

    Ok(Json(ApiResponse {
        data: promo_to_dto(&item_id, is_promo_active),
        message: "Promo toggled successfully".to_string(),
        success: true,
    }))
}

/// Preview an item under extra demand
#[utoipa::path(
    post,
    path = "/api/v1/items/{item_id}/scenario",
    tag = "items",
    params(
        ("item_id" = String, Path, description = "Item ID"),
    ),
    request_body = ScenarioRequest,
    responses(
        (status = 200, description = "Scenario computed", body = ScenarioResponse),
        (status = 400, description = "Lift out of range", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn preview_item_scenario(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Valid(Json(request)): Valid<Json<ScenarioRequest>>,
) -> Result<Json<ApiResponse<ScenarioPreviewDto>>, HandlerError> {
    trace!("Entering preview_item_scenario function");
    let dashboard = state.dashboard.read().await;
    let preview = dashboard
        .scenario_preview(&item_id, request.lift_percent)
        .map_err(compute_error)?;
    debug!("Scenario for {} projects {} units", item_id, preview.projected_units);

    Ok(Json(ApiResponse {
        data: scenario_to_dto(preview),
        message: "Scenario preview computed successfully".to_string(),
        success: true,
    }))
}
