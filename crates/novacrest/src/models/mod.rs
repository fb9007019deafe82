//! Domain models for the storefront catalog.

mod blog;
mod category;
mod product;
mod subscription;

pub use blog::{Blog, BlogInput};
pub use category::Category;
pub use product::{format_price, Product, ProductInput};
pub use subscription::{validate_email, Subscription};

use thiserror::Error;

/// Rejected input for a catalog write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Price must be a non-negative number")]
    InvalidPrice,
    #[error("Invalid email address format.")]
    InvalidEmail,
}

/// Trim a required text field, rejecting blank values.
pub(crate) fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(trimmed.to_string())
}

/// Collapse blank optional text to `None`.
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
