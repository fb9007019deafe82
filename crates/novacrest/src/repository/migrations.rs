//! Database migrations using cetane.
//!
//! Runs migrations via blocking tasks to work with async connections.

use cetane::migrator::MigrationStateStore;
use tracing::info;

use super::pool::{DbError, DbPool};

fn migration_error(msg: impl std::fmt::Display) -> DbError {
    DbError::QueryBuilderError(msg.to_string().into())
}

/// Run pending migrations for a database URL.
pub async fn run_migrations(database_url: &str) -> Result<(), DbError> {
    use cetane::backend::Sqlite;
    use cetane::migrator::Migrator;

    let path = DbPool::from_url(database_url).database_url().to_string();

    tokio::task::spawn_blocking(move || {
        let conn = rusqlite::Connection::open(&path).map_err(migration_error)?;
        let backend = Sqlite;
        let registry = crate::migrations::registry();

        let state = SqliteState::new(&conn)?;

        let mut migrator = Migrator::new(&registry, &backend, state);
        let applied = migrator
            .migrate_forward(|sql| conn.execute_batch(sql).map_err(|e| e.to_string()))
            .map_err(migration_error)?;

        for name in &applied {
            info!("Applied migration: {}", name);
        }

        if applied.is_empty() {
            info!("No pending migrations");
        }

        Ok(())
    })
    .await
    .map_err(|e| DbError::QueryBuilderError(Box::new(e)))?
}

/// Names of migrations recorded as applied, in name order.
pub async fn applied_migrations(database_url: &str) -> Result<Vec<String>, DbError> {
    let path = DbPool::from_url(database_url).database_url().to_string();

    tokio::task::spawn_blocking(move || {
        let conn = rusqlite::Connection::open(&path).map_err(migration_error)?;
        let mut state = SqliteState::new(&conn)?;
        state.applied_migrations().map_err(migration_error)
    })
    .await
    .map_err(|e| DbError::QueryBuilderError(Box::new(e)))?
}

// -- SQLite state store --

struct SqliteState<'a> {
    conn: &'a rusqlite::Connection,
}

impl<'a> SqliteState<'a> {
    fn new(conn: &'a rusqlite::Connection) -> Result<Self, DbError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS __cetane_migrations (
                name TEXT PRIMARY KEY NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        )
        .map_err(migration_error)?;

        Ok(Self { conn })
    }
}

impl MigrationStateStore for SqliteState<'_> {
    fn applied_migrations(&mut self) -> Result<Vec<String>, String> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM __cetane_migrations ORDER BY name")
            .map_err(|e| e.to_string())?;

        let names = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| e.to_string())?
            .collect::<Result<Vec<String>, _>>()
            .map_err(|e| e.to_string())?;

        Ok(names)
    }

    fn mark_applied(&mut self, name: &str) -> Result<(), String> {
        self.conn
            .execute(
                "INSERT OR IGNORE INTO __cetane_migrations (name) VALUES (?1)",
                [name],
            )
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    fn mark_unapplied(&mut self, name: &str) -> Result<(), String> {
        self.conn
            .execute("DELETE FROM __cetane_migrations WHERE name = ?1", [name])
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}
