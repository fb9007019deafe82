//! Category endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use novacrest::repository::util::is_foreign_key_violation;

use super::api_types::{CategoryRequest, CategoryView, ErrorBody, MessageResponse};
use super::{parse_body, parse_id, require};
use crate::error::ApiError;
use crate::AppState;

/// List all categories.
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories", body = Vec<CategoryView>)
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryView>>, ApiError> {
    let categories = state
        .repos
        .categories
        .list()
        .await
        .map_err(|e| ApiError::from_db("Error fetching categories", e))?;
    Ok(Json(categories.into_iter().map(CategoryView::from).collect()))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = CategoryView),
        (status = 404, description = "Category not found", body = ErrorBody)
    ),
    tag = "Categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CategoryView>, ApiError> {
    let id = parse_id(&id, "category")?;
    state
        .repos
        .categories
        .get(id)
        .await
        .map_err(|e| ApiError::from_db("Error fetching category", e))?
        .map(|c| Json(c.into()))
        .ok_or_else(|| ApiError::not_found("Category not found"))
}

#[utoipa::path(
    post,
    path = "/categories",
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Created category", body = CategoryView),
        (status = 400, description = "Name missing", body = ErrorBody)
    ),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<Json<CategoryView>, ApiError> {
    let request = parse_body(payload)?;
    let name = require(request.name.as_deref(), "Category name")?;
    let category = state
        .repos
        .categories
        .create(&name)
        .await
        .map_err(|e| ApiError::from_db("Error creating category", e))?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    put,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = MessageResponse),
        (status = 400, description = "Name missing or invalid ID", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody)
    ),
    tag = "Categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, "category")?;
    let request = parse_body(payload)?;
    let name = require(request.name.as_deref(), "Category name")?;

    let updated = state
        .repos
        .categories
        .rename(id, &name)
        .await
        .map_err(|e| ApiError::from_db("Error updating category", e))?;
    if !updated {
        return Err(ApiError::not_found("Category not found"));
    }
    Ok(Json(MessageResponse::new("Category updated")))
}

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 400, description = "Invalid ID", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody),
        (status = 409, description = "Products still use this category", body = ErrorBody)
    ),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, "category")?;
    let deleted = match state.repos.categories.delete(id).await {
        Ok(deleted) => deleted,
        Err(e) if is_foreign_key_violation(&e) => {
            return Err(ApiError::Conflict(
                "Category still has products".to_string(),
            ));
        }
        Err(e) => return Err(ApiError::from_db("Error deleting category", e)),
    };
    if !deleted {
        return Err(ApiError::not_found("Category not found"));
    }
    Ok(Json(MessageResponse::new("Category deleted")))
}
