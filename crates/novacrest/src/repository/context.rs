//! Database context for managing connections and repository access.
//!
//! The DbContext is the primary entry point for all database operations.
//! It holds the connection pool and provides access to all repositories.

use std::path::Path;

use super::blog::BlogRepository;
use super::category::CategoryRepository;
use super::pool::{DbError, DbPool};
use super::product::ProductRepository;
use super::subscription::SubscriptionRepository;
use crate::with_conn;

/// Database context that manages the connection pool and provides repository access.
///
/// # Example
/// ```ignore
/// let ctx = DbContext::from_url("sqlite:/var/lib/novacrest/novacrest.db");
/// let products = ctx.products().list().await?;
/// ```
#[derive(Clone)]
pub struct DbContext {
    pool: DbPool,
}

impl DbContext {
    /// Create a context from a database URL or file path.
    pub fn from_url(url: &str) -> Self {
        Self {
            pool: DbPool::from_url(url),
        }
    }

    /// Create a context from a database file path.
    pub fn from_path(db_path: &Path) -> Self {
        Self {
            pool: DbPool::from_path(db_path),
        }
    }

    /// Create a context around an existing pool.
    pub fn with_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.pool.clone())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    pub fn blogs(&self) -> BlogRepository {
        BlogRepository::new(self.pool.clone())
    }

    pub fn subscriptions(&self) -> SubscriptionRepository {
        SubscriptionRepository::new(self.pool.clone())
    }

    /// Test database connectivity.
    pub async fn test_connection(&self) -> Result<(), DbError> {
        with_conn!(self.pool, _conn, Ok(()))
    }

    /// List user tables in the database.
    pub async fn list_tables(&self) -> Result<Vec<String>, DbError> {
        with_conn!(self.pool, conn, {
            let rows: Vec<TableName> = diesel_async::RunQueryDsl::load(
                diesel::sql_query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
                ),
                &mut conn,
            )
            .await?;
            Ok(rows.into_iter().map(|r| r.name).collect())
        })
    }
}

#[derive(diesel::QueryableByName)]
struct TableName {
    #[diesel(sql_type = diesel::sql_types::Text)]
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_database_has_no_tables() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = DbContext::from_path(&dir.path().join("empty.db"));

        ctx.test_connection().await.unwrap();
        assert!(ctx.list_tables().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_migrated_tables_are_listed() {
        let (ctx, _dir) = super::super::test_context().await;
        let tables = ctx.list_tables().await.unwrap();
        assert_eq!(
            tables,
            vec![
                "__cetane_migrations",
                "blogs",
                "categories",
                "email_subscriptions",
                "products",
            ]
        );
    }
}
