//! Newsletter subscription endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use super::api_types::{ErrorBody, SubscribeRequest, SubscribeResponse, SubscriptionView};
use super::parse_body;
use crate::error::ApiError;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/subscriptions",
    responses(
        (status = 200, description = "All subscriptions", body = Vec<SubscriptionView>)
    ),
    tag = "Subscriptions"
)]
pub async fn list_subscriptions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubscriptionView>>, ApiError> {
    let subscriptions = state
        .repos
        .subscriptions
        .list()
        .await
        .map_err(|e| ApiError::from_db("Error fetching email subscriptions", e))?;
    Ok(Json(
        subscriptions
            .into_iter()
            .map(SubscriptionView::from)
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/subscriptions",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscribed", body = SubscribeResponse),
        (status = 400, description = "Missing or malformed email", body = ErrorBody),
        (status = 409, description = "Already subscribed", body = ErrorBody)
    ),
    tag = "Subscriptions"
)]
pub async fn subscribe(
    State(state): State<AppState>,
    payload: Result<Json<SubscribeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubscribeResponse>), ApiError> {
    let request = parse_body(payload)?;
    let email = request.email.unwrap_or_default();

    let subscription = state.repos.subscriptions.subscribe(&email).await?;
    tracing::info!("New subscription: {}", subscription.email);

    Ok((
        StatusCode::CREATED,
        Json(SubscribeResponse {
            message: "Email subscribed successfully!".to_string(),
            subscription: subscription.into(),
        }),
    ))
}
