//! API error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use novacrest::models::ValidationError;
use novacrest::repository::util::{is_foreign_key_violation, is_unique_violation};
use novacrest::repository::{DbError, SubscriptionError};

use crate::handlers::api_types::ErrorBody;

/// Error returned by handlers, rendered as `{ "error": message }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Log the underlying error and hide it behind a generic message.
    pub fn internal(message: &str, err: impl std::fmt::Display) -> Self {
        tracing::error!("{}: {}", message, err);
        Self::Internal(message.to_string())
    }

    /// Map a database error, surfacing constraint failures as client errors.
    pub fn from_db(message: &str, err: DbError) -> Self {
        if is_foreign_key_violation(&err) {
            return Self::bad_request("Invalid category ID");
        }
        if is_unique_violation(&err) {
            return Self::Conflict("Resource already exists".to_string());
        }
        Self::internal(message, err)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<SubscriptionError> for ApiError {
    fn from(err: SubscriptionError) -> Self {
        match err {
            SubscriptionError::Invalid(e) => e.into(),
            SubscriptionError::AlreadySubscribed => {
                Self::Conflict("This email is already subscribed.".to_string())
            }
            SubscriptionError::Database(e) => {
                Self::internal("Error creating email subscription.", e)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novacrest::repository::util::to_diesel_error;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(SubscriptionError::AlreadySubscribed).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(ValidationError::InvalidEmail).to_string(),
            "Invalid email address format."
        );
    }

    #[test]
    fn test_db_errors() {
        let fk = ApiError::from_db("x", to_diesel_error("FOREIGN KEY constraint failed"));
        assert_eq!(fk.status(), StatusCode::BAD_REQUEST);

        let other = ApiError::from_db("Error fetching products", to_diesel_error("disk I/O error"));
        assert_eq!(other.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(other.to_string(), "Error fetching products");
    }
}
