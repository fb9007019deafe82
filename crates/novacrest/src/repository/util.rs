//! Repository utilities.

use chrono::{DateTime, Utc};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind};

/// Simple error info wrapper for database errors.
#[derive(Debug)]
pub struct DbErrorInfo(pub String);

impl DatabaseErrorInformation for DbErrorInfo {
    fn message(&self) -> &str {
        &self.0
    }
    fn details(&self) -> Option<&str> {
        None
    }
    fn hint(&self) -> Option<&str> {
        None
    }
    fn table_name(&self) -> Option<&str> {
        None
    }
    fn column_name(&self) -> Option<&str> {
        None
    }
    fn constraint_name(&self) -> Option<&str> {
        None
    }
    fn statement_position(&self) -> Option<i32> {
        None
    }
}

/// Convert any displayable error to a diesel error with proper message.
pub fn to_diesel_error(e: impl std::fmt::Display) -> diesel::result::Error {
    diesel::result::Error::DatabaseError(
        DatabaseErrorKind::Unknown,
        Box::new(DbErrorInfo(e.to_string())),
    )
}

/// Whether a diesel error is a UNIQUE constraint violation.
pub fn is_unique_violation(e: &diesel::result::Error) -> bool {
    match e {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => true,
        diesel::result::Error::DatabaseError(_, info) => {
            info.message().contains("UNIQUE constraint failed")
        }
        _ => false,
    }
}

/// Whether a diesel error is a FOREIGN KEY constraint violation.
pub fn is_foreign_key_violation(e: &diesel::result::Error) -> bool {
    match e {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => true,
        diesel::result::Error::DatabaseError(_, info) => {
            info.message().contains("FOREIGN KEY constraint failed")
        }
        _ => false,
    }
}

/// Parse a datetime string from the database, defaulting to Unix epoch on error.
pub fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime() {
        let dt = parse_datetime("2025-03-01T10:00:00+01:00");
        assert_eq!(dt.to_rfc3339(), "2025-03-01T09:00:00+00:00");
        assert_eq!(parse_datetime("garbage"), DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_unique_violation_detection() {
        let unique = diesel::result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(DbErrorInfo("dup".into())),
        );
        assert!(is_unique_violation(&unique));
        assert!(!is_unique_violation(&to_diesel_error("disk full")));
        assert!(!is_unique_violation(&diesel::result::Error::NotFound));
        assert!(is_foreign_key_violation(&to_diesel_error(
            "FOREIGN KEY constraint failed"
        )));
    }
}
