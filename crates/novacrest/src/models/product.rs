//! Catalog products.

use serde::{Deserialize, Serialize};

use super::{optional, required, ValidationError};

/// A product, optionally carrying the name of its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    /// Decimal price with two places, e.g. `"699.99"`.
    pub price: String,
    pub picture: Option<String>,
    pub description: Option<String>,
    pub category_id: i32,
    /// Populated by listings that join the category table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

/// Fields accepted when creating or updating a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category_id: i32,
    /// Picture URL. On update, `None` keeps the stored picture.
    pub picture: Option<String>,
}

impl ProductInput {
    /// Normalize and validate the input.
    pub fn validated(self) -> Result<Self, ValidationError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(Self {
            name: required(&self.name, "Product name")?,
            price: self.price,
            description: optional(self.description.as_deref()),
            category_id: self.category_id,
            picture: optional(self.picture.as_deref()),
        })
    }

    /// Price as stored: two decimal places.
    pub fn price_text(&self) -> String {
        format_price(self.price)
    }
}

/// Format a price with exactly two decimal places.
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}
