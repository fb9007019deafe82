//! Typed API request and response types for OpenAPI spec generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use novacrest::geo::{Branch, Coordinate, DistanceResult};
use novacrest::models::{Blog, Category, Product, Subscription};

/// Error body: `{ "error": "..." }`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Acknowledgement body: `{ "message": "..." }`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A JSON value given either as a number or as numeric text.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Integer value; fractional numbers are rejected.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Number(n) if n.fract() == 0.0 => i32::try_from(*n as i64).ok(),
            Self::Number(_) => None,
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

// --- Branches ---

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationView {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinate> for LocationView {
    fn from(c: Coordinate) -> Self {
        Self {
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

/// A pharmacy branch.
#[derive(Debug, Serialize, ToSchema)]
pub struct BranchView {
    pub id: i64,
    pub name: String,
    pub location: LocationView,
}

impl From<&Branch> for BranchView {
    fn from(b: &Branch) -> Self {
        Self {
            id: b.id,
            name: b.name.clone(),
            location: b.location.into(),
        }
    }
}

/// Body of `POST /assign-branch`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AssignBranchRequest {
    pub address: Option<String>,
}

/// Nearest branch for an address.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignBranchResponse {
    pub nearest_branch: BranchView,
    /// Great-circle distance, rounded to two decimals.
    pub distance_km: f64,
}

impl From<DistanceResult> for AssignBranchResponse {
    fn from(r: DistanceResult) -> Self {
        Self {
            nearest_branch: BranchView::from(&r.branch),
            distance_km: r.distance_km,
        }
    }
}

// --- Catalog ---

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryView {
    pub id: i32,
    pub name: String,
}

impl From<Category> for CategoryView {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

/// Body of `POST /categories` and `PUT /categories/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    /// Two-decimal price, e.g. `"699.99"`.
    pub price: String,
    pub picture: Option<String>,
    pub description: Option<String>,
    pub category_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

impl From<Product> for ProductView {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price,
            picture: p.picture,
            description: p.description,
            category_id: p.category_id,
            category_name: p.category_name,
        }
    }
}

/// Body of `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: Option<String>,
    pub price: Option<NumberOrText>,
    pub description: Option<String>,
    pub category_id: Option<NumberOrText>,
    /// Picture URL. Omit on update to keep the current picture.
    pub picture: Option<String>,
    /// Alias for `picture`.
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogView {
    pub id: i32,
    pub title: String,
    pub thumbnail: Option<String>,
    /// HTML content.
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Blog> for BlogView {
    fn from(b: Blog) -> Self {
        Self {
            id: b.id,
            title: b.title,
            thumbnail: b.thumbnail,
            content: b.content,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Body of `POST /blogs` and `PUT /blogs/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    /// Thumbnail URL. Omit on update to keep the current thumbnail.
    pub thumbnail: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionView {
    pub id: i32,
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

impl From<Subscription> for SubscriptionView {
    fn from(s: Subscription) -> Self {
        Self {
            id: s.id,
            email: s.email,
            subscribed_at: s.subscribed_at,
        }
    }
}

/// Body of `POST /subscriptions`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SubscribeRequest {
    pub email: Option<String>,
}

/// Response to a new subscription.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubscribeResponse {
    pub message: String,
    pub subscription: SubscriptionView,
}
