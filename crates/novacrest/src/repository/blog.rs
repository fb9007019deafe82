//! Blog repository.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{BlogChanges, BlogRecord, NewBlog};
use super::pool::{DbError, DbPool};
use super::util::parse_datetime;
use super::LastInsertRowId;
use crate::models::{Blog, BlogInput};
use crate::schema::blogs;
use crate::with_conn;

impl From<BlogRecord> for Blog {
    fn from(record: BlogRecord) -> Self {
        Blog {
            id: record.id,
            title: record.title,
            thumbnail: record.thumbnail,
            content: record.content,
            created_at: parse_datetime(&record.created_at),
            updated_at: parse_datetime(&record.updated_at),
        }
    }
}

#[derive(Clone)]
pub struct BlogRepository {
    pool: DbPool,
}

impl BlogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Blog>, DbError> {
        with_conn!(self.pool, conn, {
            let records = blogs::table
                .order(blogs::id.asc())
                .load::<BlogRecord>(&mut conn)
                .await?;
            Ok(records.into_iter().map(Blog::from).collect())
        })
    }

    pub async fn get(&self, id: i32) -> Result<Option<Blog>, DbError> {
        with_conn!(self.pool, conn, {
            blogs::table
                .find(id)
                .first::<BlogRecord>(&mut conn)
                .await
                .optional()
                .map(|opt| opt.map(Blog::from))
        })
    }

    /// Whether a post with this exact title exists.
    pub async fn exists_by_title(&self, title: &str) -> Result<bool, DbError> {
        use diesel::dsl::count_star;
        with_conn!(self.pool, conn, {
            let count: i64 = blogs::table
                .filter(blogs::title.eq(title))
                .select(count_star())
                .first(&mut conn)
                .await?;
            Ok(count > 0)
        })
    }

    pub async fn create(&self, input: BlogInput) -> Result<Blog, DbError> {
        let now = Utc::now().to_rfc3339();
        let id = with_conn!(self.pool, conn, {
            diesel::insert_into(blogs::table)
                .values(NewBlog {
                    title: &input.title,
                    thumbnail: input.thumbnail.as_deref(),
                    content: &input.content,
                    created_at: &now,
                    updated_at: &now,
                })
                .execute(&mut conn)
                .await?;
            let row: LastInsertRowId = diesel::sql_query("SELECT last_insert_rowid()")
                .get_result(&mut conn)
                .await?;
            Ok::<_, DbError>(row.id as i32)
        })?;

        self.get(id).await?.ok_or(DbError::NotFound)
    }

    /// Update title and content, bumping `updated_at`. A `None` thumbnail
    /// keeps the stored one. Returns false if the post does not exist.
    pub async fn update(&self, id: i32, input: BlogInput) -> Result<bool, DbError> {
        let now = Utc::now().to_rfc3339();
        with_conn!(self.pool, conn, {
            let rows = diesel::update(blogs::table.find(id))
                .set(BlogChanges {
                    title: &input.title,
                    thumbnail: input.thumbnail.as_deref(),
                    content: &input.content,
                    updated_at: &now,
                })
                .execute(&mut conn)
                .await?;
            Ok(rows > 0)
        })
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbError> {
        with_conn!(self.pool, conn, {
            let rows = diesel::delete(blogs::table.find(id))
                .execute(&mut conn)
                .await?;
            Ok(rows > 0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_context;
    use crate::models::BlogInput;

    fn post(thumbnail: Option<&str>) -> BlogInput {
        BlogInput {
            title: "The Future of Tech".to_string(),
            content: "<p>Technology is evolving rapidly...</p>".to_string(),
            thumbnail: thumbnail.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_blog_lifecycle() {
        let (ctx, _dir) = test_context().await;
        let repo = ctx.blogs();

        let created = repo
            .create(post(Some("https://example.com/tech.jpg")))
            .await
            .unwrap();
        assert_eq!(created.created_at, created.updated_at);
        assert!(repo.exists_by_title("The Future of Tech").await.unwrap());

        let mut change = post(None);
        change.title = "The Future of Tech, Revisited".to_string();
        assert!(repo.update(created.id, change).await.unwrap());

        let updated = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(updated.title, "The Future of Tech, Revisited");
        assert_eq!(
            updated.thumbnail.as_deref(),
            Some("https://example.com/tech.jpg")
        );
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);

        assert_eq!(repo.list().await.unwrap().len(), 1);
        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.get(created.id).await.unwrap().is_none());
        assert!(!repo.update(created.id, post(None)).await.unwrap());
    }
}
