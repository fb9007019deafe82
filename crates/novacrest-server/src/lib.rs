//! HTTP API for the novacrest storefront.
//!
//! Serves the product catalog, blog and newsletter endpoints alongside
//! nearest-branch assignment:
//! - `POST /assign-branch` geocodes an address and picks the closest branch
//! - `GET /branches` lists the branch registry
//! - `/products`, `/categories`, `/blogs`, `/subscriptions` for the catalog

mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use novacrest::config::Settings;
use novacrest::geo::BranchLocator;
use novacrest::repository::{DbContext, Repositories};
use novacrest::services::geocode::{geocoder_from_settings, Geocoder};

/// Shared state for the web server.
///
/// The branch registry is read-only and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<Repositories>,
    pub locator: Arc<BranchLocator>,
    pub geocoder: Arc<dyn Geocoder>,
}

impl AppState {
    pub fn new(settings: &Settings, ctx: &DbContext) -> anyhow::Result<Self> {
        let geocoder = geocoder_from_settings(&settings.geocoder)?;
        tracing::debug!(
            "Using {} geocoder, {} branches",
            geocoder.name(),
            settings.branches.len()
        );

        Ok(Self {
            repos: Arc::new(Repositories::new(ctx)),
            locator: Arc::new(BranchLocator::new(settings.branches.clone())),
            geocoder,
        })
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let ctx = settings.prepare_database().await?;
    let state = AppState::new(settings, &ctx)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt;

    use novacrest::geo::{BranchRegistry, Coordinate};
    use novacrest::repository::migrations::run_migrations;
    use novacrest::services::geocode::StaticGeocoder;

    async fn setup_test_app() -> (axum::Router, DbContext, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        run_migrations(&db_path.display().to_string()).await.unwrap();
        let ctx = DbContext::from_path(&db_path);

        let addresses: HashMap<String, Coordinate> = [
            ("12 Allen Avenue, Ikeja", 6.6018, 3.3512),
            ("Adeola Odeku Street, Victoria Island", 6.43, 3.42),
            ("Admiralty Way, Lekki", 6.4654, 3.4765),
            ("Middle of nowhere", 200.0, 3.0),
        ]
        .into_iter()
        .map(|(a, lat, lon)| (a.to_string(), Coordinate::new(lat, lon)))
        .collect();

        let state = AppState {
            repos: Arc::new(Repositories::new(&ctx)),
            locator: Arc::new(BranchLocator::new(BranchRegistry::lagos())),
            geocoder: Arc::new(StaticGeocoder::new(addresses)),
        };

        (create_router(state), ctx, dir)
    }

    async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_and_test_endpoints() {
        let (app, _ctx, _dir) = setup_test_app().await;

        let (status, _) = send(app.clone(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = send(app, get("/test")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Hello from the test endpoint!");
    }

    #[tokio::test]
    async fn test_list_branches() {
        let (app, _ctx, _dir) = setup_test_app().await;

        let (status, json) = send(app, get("/branches")).await;
        assert_eq!(status, StatusCode::OK);
        let branches = json.as_array().unwrap();
        assert_eq!(branches.len(), 4);
        assert_eq!(branches[0]["id"], 1);
        assert_eq!(branches[0]["name"], "Ikeja Pharmacy");
        assert_eq!(branches[0]["location"]["latitude"], 6.602);
        assert_eq!(branches[3]["name"], "Surulere Pharmacy");
    }

    #[tokio::test]
    async fn test_assign_branch() {
        let (app, _ctx, _dir) = setup_test_app().await;

        let (status, json) = send(
            app.clone(),
            json_request(
                "POST",
                "/assign-branch",
                serde_json::json!({"address": "12 Allen Avenue, Ikeja"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["nearestBranch"]["id"], 1);
        assert_eq!(json["nearestBranch"]["name"], "Ikeja Pharmacy");
        assert_eq!(json["distanceKm"], 0.04);

        let (status, json) = send(
            app.clone(),
            json_request(
                "POST",
                "/assign-branch",
                serde_json::json!({"address": "Adeola Odeku Street, Victoria Island"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["nearestBranch"]["id"], 2);

        let (status, json) = send(
            app,
            json_request(
                "POST",
                "/assign-branch",
                serde_json::json!({"address": "admiralty way, lekki"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["nearestBranch"]["id"], 3);
        assert_eq!(json["distanceKm"], 0.0);
    }

    #[tokio::test]
    async fn test_assign_branch_requires_address() {
        let (app, _ctx, _dir) = setup_test_app().await;

        for body in [
            serde_json::json!({}),
            serde_json::json!({"address": "   "}),
            serde_json::json!({"address": null}),
        ] {
            let (status, json) =
                send(app.clone(), json_request("POST", "/assign-branch", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], "Address is required");
        }

        let request = Request::builder()
            .method("POST")
            .uri("/assign-branch")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Address is required");
    }

    #[tokio::test]
    async fn test_assign_branch_geocode_failures() {
        let (app, _ctx, _dir) = setup_test_app().await;

        let (status, json) = send(
            app.clone(),
            json_request(
                "POST",
                "/assign-branch",
                serde_json::json!({"address": "Unknown Road"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["error"].as_str().unwrap().contains("Unknown Road"));

        // Out-of-range coordinates never reach the locator
        let (status, _) = send(
            app,
            json_request(
                "POST",
                "/assign-branch",
                serde_json::json!({"address": "Middle of nowhere"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_assign_branch_empty_registry() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        run_migrations(&db_path.display().to_string()).await.unwrap();
        let ctx = DbContext::from_path(&db_path);

        let geocoder: StaticGeocoder = [("Ikeja".to_string(), Coordinate::new(6.6, 3.35))]
            .into_iter()
            .collect();
        let state = AppState {
            repos: Arc::new(Repositories::new(&ctx)),
            locator: Arc::new(BranchLocator::new(BranchRegistry::new(Vec::new()))),
            geocoder: Arc::new(geocoder),
        };

        let (status, json) = send(
            create_router(state),
            json_request("POST", "/assign-branch", serde_json::json!({"address": "Ikeja"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Failed to assign branch");
    }

    #[tokio::test]
    async fn test_product_crud() {
        let (app, ctx, _dir) = setup_test_app().await;
        let books = ctx.categories().create("Books").await.unwrap();

        let (status, created) = send(
            app.clone(),
            json_request(
                "POST",
                "/products",
                serde_json::json!({
                    "name": "Cookbook",
                    "price": "29.99",
                    "description": "A book full of delicious recipes",
                    "categoryId": books.id,
                    "imageUrl": "https://example.com/cookbook.jpg"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["price"], "29.99");
        assert_eq!(created["picture"], "https://example.com/cookbook.jpg");
        let id = created["id"].as_i64().unwrap();

        let (status, listed) = send(app.clone(), get("/products")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed[0]["categoryName"], "Books");

        let (status, json) = send(
            app.clone(),
            json_request(
                "PUT",
                &format!("/products/{}", id),
                serde_json::json!({"name": "Cookbook", "price": 25, "categoryId": books.id}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Product updated");

        let (_, fetched) = send(app.clone(), get(&format!("/products/{}", id))).await;
        assert_eq!(fetched["price"], "25.00");
        assert_eq!(fetched["picture"], "https://example.com/cookbook.jpg");

        let (status, json) = send(
            app.clone(),
            Request::builder()
                .method("DELETE")
                .uri(format!("/products/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Product deleted");

        let (status, json) = send(app, get(&format!("/products/{}", id))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Product not found");
    }

    #[tokio::test]
    async fn test_product_validation() {
        let (app, _ctx, _dir) = setup_test_app().await;

        let (status, json) = send(
            app.clone(),
            json_request("POST", "/products", serde_json::json!({"price": 1, "categoryId": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Product name is required");

        let (status, json) = send(
            app.clone(),
            json_request(
                "POST",
                "/products",
                serde_json::json!({"name": "Pen", "price": 1, "categoryId": 99}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid category ID");

        let (status, _) = send(app.clone(), get("/products/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = send(
            app,
            json_request(
                "PUT",
                "/products/42",
                serde_json::json!({"name": "Pen", "price": 1, "categoryId": 1}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Product not found");
    }

    #[tokio::test]
    async fn test_category_endpoints() {
        let (app, _ctx, _dir) = setup_test_app().await;

        let (status, json) =
            send(app.clone(), json_request("POST", "/categories", serde_json::json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Category name is required");

        let (status, created) = send(
            app.clone(),
            json_request("POST", "/categories", serde_json::json!({"name": "Wellness"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = created["id"].as_i64().unwrap();

        let (status, json) = send(
            app.clone(),
            json_request(
                "PUT",
                &format!("/categories/{}", id),
                serde_json::json!({"name": "Health & Wellness"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Category updated");

        let (_, fetched) = send(app.clone(), get(&format!("/categories/{}", id))).await;
        assert_eq!(fetched["name"], "Health & Wellness");

        let delete = |uri: String| {
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap()
        };
        let (status, json) = send(app.clone(), delete("/categories/x".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid category ID");

        let (status, _) = send(app.clone(), delete(format!("/categories/{}", id))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = send(app, get(&format!("/categories/{}", id))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Category not found");
    }

    #[tokio::test]
    async fn test_category_in_use_cannot_be_deleted() {
        let (app, ctx, _dir) = setup_test_app().await;
        novacrest::seed::seed(&ctx).await.unwrap();
        let books = ctx.categories().find_by_name("Books").await.unwrap().unwrap();

        let (status, _) = send(
            app,
            Request::builder()
                .method("DELETE")
                .uri(format!("/categories/{}", books.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_blog_endpoints() {
        let (app, ctx, _dir) = setup_test_app().await;
        novacrest::seed::seed(&ctx).await.unwrap();

        let (status, blogs) = send(app.clone(), get("/blogs")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(blogs.as_array().unwrap().len(), 2);
        let id = blogs[0]["id"].as_i64().unwrap();

        let (status, json) = send(
            app.clone(),
            json_request(
                "PUT",
                &format!("/blogs/{}", id),
                serde_json::json!({"title": "Tech, Updated", "content": "<p>New</p>"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Blog updated");

        let (_, blog) = send(app.clone(), get(&format!("/blogs/{}", id))).await;
        assert_eq!(blog["title"], "Tech, Updated");
        assert_eq!(blog["thumbnail"], "https://example.com/tech.jpg");

        let (status, json) = send(
            app.clone(),
            json_request("POST", "/blogs", serde_json::json!({"title": "No body"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Blog content is required");

        let (status, json) = send(app, get("/blogs/999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Blog not found");
    }

    #[tokio::test]
    async fn test_subscriptions() {
        let (app, _ctx, _dir) = setup_test_app().await;

        let (status, json) = send(
            app.clone(),
            json_request(
                "POST",
                "/subscriptions",
                serde_json::json!({"email": "ada@example.com"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "Email subscribed successfully!");
        assert_eq!(json["subscription"]["email"], "ada@example.com");

        let (status, json) = send(
            app.clone(),
            json_request(
                "POST",
                "/subscriptions",
                serde_json::json!({"email": "ada@example.com"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"], "This email is already subscribed.");

        let (status, json) = send(
            app.clone(),
            json_request("POST", "/subscriptions", serde_json::json!({"email": "nope"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid email address format.");

        let (status, json) = send(
            app.clone(),
            json_request("POST", "/subscriptions", serde_json::json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Email address is required");

        let (status, json) = send(app, get("/subscriptions")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_openapi_spec() {
        let (app, _ctx, _dir) = setup_test_app().await;

        let (status, json) = send(app, get("/api/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["info"]["title"], "Novacrest API");
        assert!(json["paths"]["/assign-branch"]["post"].is_object());
        assert!(json["paths"]["/products/{id}"]["delete"].is_object());
    }

    #[test]
    fn test_app_state_from_settings() {
        let dir = tempdir().unwrap();
        let mut settings = Settings::with_data_dir(dir.path().to_path_buf());
        settings.geocoder.base_url = "offline".to_string();
        let ctx = settings.create_db_context();

        let state = AppState::new(&settings, &ctx).unwrap();
        assert_eq!(state.geocoder.name(), "static");
        assert_eq!(state.locator.registry().len(), 4);
    }
}
