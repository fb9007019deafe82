//! OpenAPI spec generation and serving.

use axum::{http::StatusCode, response::IntoResponse};
use utoipa::OpenApi;

use super::api;
use super::api_types;
use super::blogs;
use super::branches;
use super::categories;
use super::products;
use super::subscriptions;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Novacrest API",
        description = "Pharmacy storefront: catalog, blog, newsletter and branch assignment"
    ),
    paths(
        // Health
        api::health,
        api::test_endpoint,
        // Branches
        branches::list_branches,
        branches::assign_branch,
        // Products
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Blogs
        blogs::list_blogs,
        blogs::get_blog,
        blogs::create_blog,
        blogs::update_blog,
        blogs::delete_blog,
        // Subscriptions
        subscriptions::list_subscriptions,
        subscriptions::subscribe,
    ),
    components(schemas(
        api_types::ErrorBody,
        api_types::MessageResponse,
        api_types::NumberOrText,
        api_types::LocationView,
        api_types::BranchView,
        api_types::AssignBranchRequest,
        api_types::AssignBranchResponse,
        api_types::CategoryView,
        api_types::CategoryRequest,
        api_types::ProductView,
        api_types::ProductRequest,
        api_types::BlogView,
        api_types::BlogRequest,
        api_types::SubscriptionView,
        api_types::SubscribeRequest,
        api_types::SubscribeResponse,
    )),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Branches", description = "Pharmacy branches and nearest-branch assignment"),
        (name = "Products", description = "Product catalog"),
        (name = "Categories", description = "Product categories"),
        (name = "Blogs", description = "Blog posts"),
        (name = "Subscriptions", description = "Newsletter subscriptions"),
    )
)]
struct ApiDoc;

/// Serve the OpenAPI spec as JSON.
pub async fn openapi_spec() -> impl IntoResponse {
    let spec = ApiDoc::openapi()
        .to_json()
        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
    (StatusCode::OK, [("content-type", "application/json")], spec)
}
