//! Repository layer for database persistence.
//!
//! All database access uses Diesel ORM over SQLite with compile-time
//! query checking.

pub mod blog;
pub mod category;
pub mod context;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod product;
pub mod subscription;
pub mod util;

pub use blog::BlogRepository;
pub use category::CategoryRepository;
pub use context::DbContext;
pub use pool::{DbError, DbPool};
pub use product::ProductRepository;
pub use subscription::{SubscriptionError, SubscriptionRepository};

use diesel::QueryableByName;

/// Bundled repository access for all database operations.
#[derive(Clone)]
pub struct Repositories {
    pub categories: CategoryRepository,
    pub products: ProductRepository,
    pub blogs: BlogRepository,
    pub subscriptions: SubscriptionRepository,
    pool: DbPool,
}

impl Repositories {
    pub fn new(ctx: &DbContext) -> Self {
        Self {
            categories: ctx.categories(),
            products: ctx.products(),
            blogs: ctx.blogs(),
            subscriptions: ctx.subscriptions(),
            pool: ctx.pool().clone(),
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::BigInt, column_name = "last_insert_rowid()")]
    id: i64,
}

/// Migrated throwaway database for repository tests.
#[cfg(test)]
pub(crate) async fn test_context() -> (DbContext, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    migrations::run_migrations(&path.display().to_string())
        .await
        .unwrap();
    (DbContext::from_path(&path), dir)
}
