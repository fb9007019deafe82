//! Product endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use novacrest::models::{ProductInput, ValidationError};

use super::api_types::{ErrorBody, MessageResponse, ProductRequest, ProductView};
use super::{parse_body, parse_id, require};
use crate::error::ApiError;
use crate::AppState;

/// Turn a request body into validated product fields.
fn product_input(request: ProductRequest) -> Result<ProductInput, ApiError> {
    let name = require(request.name.as_deref(), "Product name")?;
    let price = request
        .price
        .as_ref()
        .ok_or_else(|| ApiError::bad_request("Price is required"))?
        .as_f64()
        .ok_or(ValidationError::InvalidPrice)?;
    let category_id = request
        .category_id
        .as_ref()
        .ok_or_else(|| ApiError::bad_request("Category ID is required"))?
        .as_i32()
        .ok_or_else(|| ApiError::bad_request("Invalid category ID"))?;

    let input = ProductInput {
        name,
        price,
        description: request.description,
        category_id,
        picture: request.picture.or(request.image_url),
    };
    Ok(input.validated()?)
}

/// List products with their category names.
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products", body = Vec<ProductView>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductView>>, ApiError> {
    let products = state
        .repos
        .products
        .list()
        .await
        .map_err(|e| ApiError::from_db("Error fetching products", e))?;
    Ok(Json(products.into_iter().map(ProductView::from).collect()))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = ProductView),
        (status = 404, description = "Product not found", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>, ApiError> {
    let id = parse_id(&id, "product")?;
    state
        .repos
        .products
        .get(id)
        .await
        .map_err(|e| ApiError::from_db("Error fetching product", e))?
        .map(|p| Json(p.into()))
        .ok_or_else(|| ApiError::not_found("Product not found"))
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Created product", body = ProductView),
        (status = 400, description = "Missing or invalid fields", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<ProductView>, ApiError> {
    let input = product_input(parse_body(payload)?)?;
    let product = state
        .repos
        .products
        .create(input)
        .await
        .map_err(|e| ApiError::from_db("Error creating product", e))?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = MessageResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, "product")?;
    let input = product_input(parse_body(payload)?)?;
    let updated = state
        .repos
        .products
        .update(id, input)
        .await
        .map_err(|e| ApiError::from_db("Error updating product", e))?;
    if !updated {
        return Err(ApiError::not_found("Product not found"));
    }
    Ok(Json(MessageResponse::new("Product updated")))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Product not found", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, "product")?;
    let deleted = state
        .repos
        .products
        .delete(id)
        .await
        .map_err(|e| ApiError::from_db("Error deleting product", e))?;
    if !deleted {
        return Err(ApiError::not_found("Product not found"));
    }
    Ok(Json(MessageResponse::new("Product deleted")))
}
