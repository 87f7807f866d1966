use axum::{extract::State, http::StatusCode, response::Json};
use axum_valid::Valid;
use common::ProfileDto;
use model::BusinessType;
use tracing::{info, instrument, trace, warn};

use crate::helpers::converters::profile_to_dto;
use crate::helpers::errors::{HandlerError, compute_error, error_response};
use crate::schemas::{ApiResponse, AppState, ErrorResponse, ProfileResponse, UpdateProfileRequest};

/// Get the active business profile
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    tag = "profile",
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ProfileResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_profile(State(state): State<AppState>) -> Json<ApiResponse<ProfileDto>> {
    let dashboard = state.dashboard.read().await;
    Json(ApiResponse {
        data: profile_to_dto(&dashboard),
        message: "Profile retrieved successfully".to_string(),
        success: true,
    })
}

/// Switch the business type
///
/// Regenerates the item catalog, which drops every promo toggle, and clears
/// cached series and KPIs.
#[utoipa::path(
    put,
    path = "/api/v1/profile",
    tag = "profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile switched", body = ProfileResponse),
        (status = 400, description = "Unknown business type", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_profile(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<UpdateProfileRequest>>,
) -> Result<Json<ApiResponse<ProfileDto>>, HandlerError> {
    trace!("Entering update_profile function");
    let business_type: BusinessType = request.business_type.parse().map_err(|e| {
        warn!("Rejected business type {:?}", request.business_type);
        error_response(StatusCode::BAD_REQUEST, "INVALID_BUSINESS_TYPE", format!("{}", e))
    })?;

    let mut dashboard = state.dashboard.write().await;
    dashboard.set_business_type(business_type).map_err(compute_error)?;
    state.cache.invalidate_all();
    info!("Business type is now {}", business_type);

    Ok(Json(ApiResponse {
        data: profile_to_dto(&dashboard),
        message: "Profile updated successfully".to_string(),
        success: true,
    }))
}
