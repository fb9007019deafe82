//! Service endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use novacrest::repository::DbContext;

use super::api_types::MessageResponse;
use crate::AppState;

/// Health check endpoint for container orchestration.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server and database are reachable"),
        (status = 503, description = "Database is unreachable")
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let ctx = DbContext::with_pool(state.repos.pool().clone());
    match ctx.test_connection().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Smoke-test endpoint.
#[utoipa::path(
    get,
    path = "/test",
    responses(
        (status = 200, description = "Greeting", body = MessageResponse)
    ),
    tag = "Health"
)]
pub async fn test_endpoint() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello from the test endpoint!"))
}
