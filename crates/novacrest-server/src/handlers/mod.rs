//! HTTP request handlers for the web server.

mod api;
pub mod api_types;
mod blogs;
mod branches;
mod categories;
pub mod openapi;
mod products;
mod subscriptions;

// Re-export handlers for use by the router
pub use api::{health, test_endpoint};
pub use blogs::{create_blog, delete_blog, get_blog, list_blogs, update_blog};
pub use branches::{assign_branch, list_branches};
pub use categories::{
    create_category, delete_category, get_category, list_categories, update_category,
};
pub use products::{create_product, delete_product, get_product, list_products, update_product};
pub use subscriptions::{list_subscriptions, subscribe};

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::ApiError;

/// Unwrap a JSON body, reporting malformed input as a 400.
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// Parse a numeric path id.
fn parse_id(raw: &str, thing: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid {} ID", thing)))
}

/// Trimmed non-empty text or a "<field> is required" error.
fn require(value: Option<&str>, field: &str) -> Result<String, ApiError> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::bad_request(format!("{} is required", field)))
}
