//! Category repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{CategoryRecord, NewCategory};
use super::pool::{DbError, DbPool};
use super::LastInsertRowId;
use crate::models::Category;
use crate::schema::categories;
use crate::with_conn;

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Category {
            id: record.id,
            name: record.name,
        }
    }
}

#[derive(Clone)]
pub struct CategoryRepository {
    pool: DbPool,
}

impl CategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// All categories ordered by id.
    pub async fn list(&self) -> Result<Vec<Category>, DbError> {
        with_conn!(self.pool, conn, {
            let records = categories::table
                .order(categories::id.asc())
                .load::<CategoryRecord>(&mut conn)
                .await?;
            Ok(records.into_iter().map(Category::from).collect())
        })
    }

    pub async fn get(&self, id: i32) -> Result<Option<Category>, DbError> {
        with_conn!(self.pool, conn, {
            categories::table
                .find(id)
                .first::<CategoryRecord>(&mut conn)
                .await
                .optional()
                .map(|opt| opt.map(Category::from))
        })
    }

    /// Look up a category by exact name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DbError> {
        with_conn!(self.pool, conn, {
            categories::table
                .filter(categories::name.eq(name))
                .order(categories::id.asc())
                .first::<CategoryRecord>(&mut conn)
                .await
                .optional()
                .map(|opt| opt.map(Category::from))
        })
    }

    /// Insert a category and return it with its new id.
    pub async fn create(&self, name: &str) -> Result<Category, DbError> {
        with_conn!(self.pool, conn, {
            diesel::insert_into(categories::table)
                .values(NewCategory { name })
                .execute(&mut conn)
                .await?;
            let row: LastInsertRowId = diesel::sql_query("SELECT last_insert_rowid()")
                .get_result(&mut conn)
                .await?;
            Ok(Category {
                id: row.id as i32,
                name: name.to_string(),
            })
        })
    }

    /// Rename a category. Returns false if it does not exist.
    pub async fn rename(&self, id: i32, name: &str) -> Result<bool, DbError> {
        with_conn!(self.pool, conn, {
            let rows = diesel::update(categories::table.find(id))
                .set(categories::name.eq(name))
                .execute(&mut conn)
                .await?;
            Ok(rows > 0)
        })
    }

    /// Delete a category. Fails with a foreign key violation while
    /// products still reference it.
    pub async fn delete(&self, id: i32) -> Result<bool, DbError> {
        with_conn!(self.pool, conn, {
            let rows = diesel::delete(categories::table.find(id))
                .execute(&mut conn)
                .await?;
            Ok(rows > 0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_context;
    use crate::repository::util::is_foreign_key_violation;
    use crate::models::ProductInput;

    #[tokio::test]
    async fn test_category_crud() {
        let (ctx, _dir) = test_context().await;
        let repo = ctx.categories();

        let books = repo.create("Books").await.unwrap();
        let toys = repo.create("Toys").await.unwrap();
        assert!(toys.id > books.id);

        assert_eq!(repo.get(books.id).await.unwrap(), Some(books.clone()));
        assert_eq!(
            repo.find_by_name("Toys").await.unwrap().map(|c| c.id),
            Some(toys.id)
        );

        assert!(repo.rename(toys.id, "Games").await.unwrap());
        assert_eq!(repo.get(toys.id).await.unwrap().unwrap().name, "Games");
        assert!(!repo.rename(999, "Nope").await.unwrap());

        assert!(repo.delete(toys.id).await.unwrap());
        assert!(!repo.delete(toys.id).await.unwrap());

        let names: Vec<_> = repo.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Books"]);
    }

    #[tokio::test]
    async fn test_delete_referenced_category_fails() {
        let (ctx, _dir) = test_context().await;
        let books = ctx.categories().create("Books").await.unwrap();
        ctx.products()
            .create(ProductInput {
                name: "Cookbook".to_string(),
                price: 29.99,
                description: None,
                category_id: books.id,
                picture: None,
            })
            .await
            .unwrap();

        let err = ctx.categories().delete(books.id).await.unwrap_err();
        assert!(is_foreign_key_violation(&err));
    }
}
