//! SQLite connection pool for diesel-async.
//!
//! Connections are opened on demand through `SyncConnectionWrapper`, which
//! runs the blocking SQLite driver on tokio's blocking pool.

use std::path::Path;

use diesel::sqlite::SqliteConnection;
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, SimpleAsyncConnection};

use super::util::to_diesel_error;

/// Diesel error type alias.
pub type DbError = diesel::result::Error;

/// Async SQLite connection type.
pub type SqliteConn = SyncConnectionWrapper<SqliteConnection>;

/// Pragmas applied to every new connection.
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;";

/// Lightweight SQLite pool (creates connections on demand).
#[derive(Debug, Clone)]
pub struct DbPool {
    database_url: String,
}

impl DbPool {
    /// Create a pool from a database URL or plain file path.
    pub fn from_url(database_url: &str) -> Self {
        let url = database_url.strip_prefix("sqlite:").unwrap_or(database_url);
        // sqlite:///abs/path and sqlite:relative both resolve to a file path
        let url = url.strip_prefix("//").unwrap_or(url);
        Self {
            database_url: url.to_string(),
        }
    }

    /// Create pool from a file path.
    pub fn from_path(path: &Path) -> Self {
        Self::from_url(&path.display().to_string())
    }

    /// Get a connection.
    pub async fn get(&self) -> Result<SqliteConn, DbError> {
        let mut conn = SqliteConn::establish(&self.database_url)
            .await
            .map_err(to_diesel_error)?;
        conn.batch_execute(CONNECTION_PRAGMAS).await?;
        Ok(conn)
    }

    /// Get the database file path.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Macro for running database operations with a pooled connection.
///
/// # Example
/// ```ignore
/// with_conn!(self.pool, conn, {
///     categories::table.load::<CategoryRecord>(&mut conn).await
/// })
/// ```
#[macro_export]
macro_rules! with_conn {
    ($pool:expr, $conn:ident, $body:expr) => {{
        let mut $conn = $pool.get().await?;
        $body
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_forms() {
        assert_eq!(
            DbPool::from_url("/path/to/db.sqlite").database_url(),
            "/path/to/db.sqlite"
        );
        assert_eq!(
            DbPool::from_url("sqlite:/path/to/db").database_url(),
            "/path/to/db"
        );
        assert_eq!(
            DbPool::from_url("sqlite:///path/to/db").database_url(),
            "/path/to/db"
        );
        assert_eq!(DbPool::from_url("sqlite:rel.db").database_url(), "rel.db");
    }

    #[tokio::test]
    async fn test_get_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.db");
        let pool = DbPool::from_path(&path);
        let _conn = pool.get().await.unwrap();
        assert!(path.exists());
    }
}
