//! Router configuration for the web server.

use axum::{routing::get, routing::post, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check for container orchestration
        .route("/health", get(handlers::health))
        .route("/test", get(handlers::test_endpoint))
        // Branches
        .route("/branches", get(handlers::list_branches))
        .route("/assign-branch", post(handlers::assign_branch))
        // Catalog
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/products/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/categories/:id",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route(
            "/blogs",
            get(handlers::list_blogs).post(handlers::create_blog),
        )
        .route(
            "/blogs/:id",
            get(handlers::get_blog)
                .put(handlers::update_blog)
                .delete(handlers::delete_blog),
        )
        .route(
            "/subscriptions",
            get(handlers::list_subscriptions).post(handlers::subscribe),
        )
        // OpenAPI spec
        .route(
            "/api/openapi.json",
            get(handlers::openapi::openapi_spec),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
