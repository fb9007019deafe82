//! Product repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{NewProduct, ProductChanges, ProductRecord};
use super::pool::{DbError, DbPool};
use super::LastInsertRowId;
use crate::models::{Product, ProductInput};
use crate::schema::{categories, products};
use crate::with_conn;

impl From<(ProductRecord, Option<String>)> for Product {
    fn from((record, category_name): (ProductRecord, Option<String>)) -> Self {
        Product {
            id: record.id,
            name: record.name,
            price: record.price,
            picture: record.picture,
            description: record.description,
            category_id: record.category_id,
            category_name,
        }
    }
}

#[derive(Clone)]
pub struct ProductRepository {
    pool: DbPool,
}

impl ProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// All products with their category name, ordered by id.
    pub async fn list(&self) -> Result<Vec<Product>, DbError> {
        with_conn!(self.pool, conn, {
            let rows = products::table
                .left_join(categories::table)
                .select((ProductRecord::as_select(), categories::name.nullable()))
                .order(products::id.asc())
                .load::<(ProductRecord, Option<String>)>(&mut conn)
                .await?;
            Ok(rows.into_iter().map(Product::from).collect())
        })
    }

    pub async fn get(&self, id: i32) -> Result<Option<Product>, DbError> {
        with_conn!(self.pool, conn, {
            products::table
                .left_join(categories::table)
                .filter(products::id.eq(id))
                .select((ProductRecord::as_select(), categories::name.nullable()))
                .first::<(ProductRecord, Option<String>)>(&mut conn)
                .await
                .optional()
                .map(|opt| opt.map(Product::from))
        })
    }

    /// Whether a product with this exact name exists.
    pub async fn exists_by_name(&self, name: &str) -> Result<bool, DbError> {
        use diesel::dsl::count_star;
        with_conn!(self.pool, conn, {
            let count: i64 = products::table
                .filter(products::name.eq(name))
                .select(count_star())
                .first(&mut conn)
                .await?;
            Ok(count > 0)
        })
    }

    /// Insert a product and return the stored row.
    pub async fn create(&self, input: ProductInput) -> Result<Product, DbError> {
        let price = input.price_text();
        let id = with_conn!(self.pool, conn, {
            diesel::insert_into(products::table)
                .values(NewProduct {
                    name: &input.name,
                    price: &price,
                    picture: input.picture.as_deref(),
                    description: input.description.as_deref(),
                    category_id: input.category_id,
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

    /// Update a product. A `None` picture or description keeps the stored
    /// value. Returns false if the product does not exist.
    pub async fn update(&self, id: i32, input: ProductInput) -> Result<bool, DbError> {
        let price = input.price_text();
        with_conn!(self.pool, conn, {
            let rows = diesel::update(products::table.find(id))
                .set(ProductChanges {
                    name: &input.name,
                    price: &price,
                    picture: input.picture.as_deref(),
                    description: input.description.as_deref(),
                    category_id: input.category_id,
                })
                .execute(&mut conn)
                .await?;
            Ok(rows > 0)
        })
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbError> {
        with_conn!(self.pool, conn, {
            let rows = diesel::delete(products::table.find(id))
                .execute(&mut conn)
                .await?;
            Ok(rows > 0)
        })
    }
}
