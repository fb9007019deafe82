use cetane::prelude::*;

pub fn migration() -> Migration {
    Migration::new("0001_catalog")
        // categories - must come first for FK reference
        .operation(RunSql::portable().for_backend(
            "sqlite",
            r#"CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
)"#,
        ))
        // products - price kept as fixed two-decimal text
        .operation(RunSql::portable().for_backend(
            "sqlite",
            r#"CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    price TEXT NOT NULL,
    picture TEXT,
    description TEXT,
    category_id INTEGER NOT NULL,
    FOREIGN KEY (category_id) REFERENCES categories(id)
)"#,
        ))
        .operation(AddIndex::new(
            "products",
            Index::new("idx_products_category").column("category_id"),
        ))
}
