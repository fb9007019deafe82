use cetane::prelude::*;

pub fn migration() -> Migration {
    Migration::new("0002_content")
        .depends_on(&["0001_catalog"])
        .operation(RunSql::portable().for_backend(
            "sqlite",
            r#"CREATE TABLE IF NOT EXISTS blogs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    thumbnail TEXT,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)"#,
        ))
        .operation(RunSql::portable().for_backend(
            "sqlite",
            r#"CREATE TABLE IF NOT EXISTS email_subscriptions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    subscribed_at TEXT NOT NULL
)"#,
        ))
}
