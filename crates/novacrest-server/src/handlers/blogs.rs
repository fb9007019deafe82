//! Blog endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use novacrest::models::BlogInput;

use super::api_types::{BlogRequest, BlogView, ErrorBody, MessageResponse};
use super::{parse_body, parse_id, require};
use crate::error::ApiError;
use crate::AppState;

fn blog_input(request: BlogRequest) -> Result<BlogInput, ApiError> {
    let input = BlogInput {
        title: require(request.title.as_deref(), "Blog title")?,
        content: require(request.content.as_deref(), "Blog content")?,
        thumbnail: request.thumbnail,
    };
    Ok(input.validated()?)
}

#[utoipa::path(
    get,
    path = "/blogs",
    responses(
        (status = 200, description = "All blog posts", body = Vec<BlogView>)
    ),
    tag = "Blogs"
)]
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogView>>, ApiError> {
    let blogs = state
        .repos
        .blogs
        .list()
        .await
        .map_err(|e| ApiError::from_db("Error fetching blogs", e))?;
    Ok(Json(blogs.into_iter().map(BlogView::from).collect()))
}

#[utoipa::path(
    get,
    path = "/blogs/{id}",
    params(("id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog post", body = BlogView),
        (status = 404, description = "Blog not found", body = ErrorBody)
    ),
    tag = "Blogs"
)]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogView>, ApiError> {
    let id = parse_id(&id, "blog")?;
    state
        .repos
        .blogs
        .get(id)
        .await
        .map_err(|e| ApiError::from_db("Error fetching blog", e))?
        .map(|b| Json(b.into()))
        .ok_or_else(|| ApiError::not_found("Blog not found"))
}

#[utoipa::path(
    post,
    path = "/blogs",
    request_body = BlogRequest,
    responses(
        (status = 200, description = "Created blog post", body = BlogView),
        (status = 400, description = "Missing fields", body = ErrorBody)
    ),
    tag = "Blogs"
)]
pub async fn create_blog(
    State(state): State<AppState>,
    payload: Result<Json<BlogRequest>, JsonRejection>,
) -> Result<Json<BlogView>, ApiError> {
    let input = blog_input(parse_body(payload)?)?;
    let blog = state
        .repos
        .blogs
        .create(input)
        .await
        .map_err(|e| ApiError::from_db("Error creating blog", e))?;
    Ok(Json(blog.into()))
}

#[utoipa::path(
    put,
    path = "/blogs/{id}",
    params(("id" = i32, Path, description = "Blog ID")),
    request_body = BlogRequest,
    responses(
        (status = 200, description = "Blog updated", body = MessageResponse),
        (status = 400, description = "Missing fields", body = ErrorBody),
        (status = 404, description = "Blog not found", body = ErrorBody)
    ),
    tag = "Blogs"
)]
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BlogRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, "blog")?;
    let input = blog_input(parse_body(payload)?)?;
    let updated = state
        .repos
        .blogs
        .update(id, input)
        .await
        .map_err(|e| ApiError::from_db("Error updating blog", e))?;
    if !updated {
        return Err(ApiError::not_found("Blog not found"));
    }
    Ok(Json(MessageResponse::new("Blog updated")))
}

#[utoipa::path(
    delete,
    path = "/blogs/{id}",
    params(("id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog deleted", body = MessageResponse),
        (status = 404, description = "Blog not found", body = ErrorBody)
    ),
    tag = "Blogs"
)]
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, "blog")?;
    let deleted = state
        .repos
        .blogs
        .delete(id)
        .await
        .map_err(|e| ApiError::from_db("Error deleting blog", e))?;
    if !deleted {
        return Err(ApiError::not_found("Blog not found"));
    }
    Ok(Json(MessageResponse::new("Blog deleted")))
}
