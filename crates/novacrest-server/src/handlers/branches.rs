//! Branch listing and nearest-branch assignment.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info, warn};

use super::api_types::{AssignBranchRequest, AssignBranchResponse, BranchView, ErrorBody};
use crate::error::ApiError;
use crate::AppState;

/// List all branches in registry order.
#[utoipa::path(
    get,
    path = "/branches",
    responses(
        (status = 200, description = "All branches", body = Vec<BranchView>)
    ),
    tag = "Branches"
)]
pub async fn list_branches(State(state): State<AppState>) -> Json<Vec<BranchView>> {
    Json(
        state
            .locator
            .registry()
            .branches()
            .iter()
            .map(BranchView::from)
            .collect(),
    )
}

/// Geocode an address and return the closest branch.
#[utoipa::path(
    post,
    path = "/assign-branch",
    request_body = AssignBranchRequest,
    responses(
        (status = 200, description = "Nearest branch", body = AssignBranchResponse),
        (status = 400, description = "Address missing", body = ErrorBody),
        (status = 500, description = "Geocoding or lookup failed", body = ErrorBody)
    ),
    tag = "Branches"
)]
pub async fn assign_branch(
    State(state): State<AppState>,
    payload: Result<Json<AssignBranchRequest>, JsonRejection>,
) -> Result<Json<AssignBranchResponse>, ApiError> {
    // Unreadable bodies carry no address either
    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let address = request
        .address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ApiError::bad_request("Address is required"))?;

    let coordinate = state.geocoder.geocode(address).await.map_err(|e| {
        warn!("Geocoding '{}' via {} failed: {}", address, state.geocoder.name(), e);
        ApiError::Internal(format!("Failed to geocode address: {}", e))
    })?;

    let result = state
        .locator
        .nearest(&coordinate)
        .map_err(|e| ApiError::internal("Failed to assign branch", e))?;

    info!(
        "Assigned '{}' to {} ({} km)",
        address, result.branch.name, result.distance_km
    );
    Ok(Json(result.into()))
}
