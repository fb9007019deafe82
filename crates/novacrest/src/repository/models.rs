//! Diesel ORM models for database tables.

use diesel::prelude::*;

use crate::schema;

/// Category record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryRecord {
    pub id: i32,
    pub name: String,
}

/// New category for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::categories)]
pub struct NewCategory<'a> {
    pub name: &'a str,
}

/// Product record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductRecord {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub picture: Option<String>,
    pub description: Option<String>,
    pub category_id: i32,
}

/// New product for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::products)]
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub price: &'a str,
    pub picture: Option<&'a str>,
    pub description: Option<&'a str>,
    pub category_id: i32,
}

/// Product update. `None` fields are left untouched.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = schema::products)]
pub struct ProductChanges<'a> {
    pub name: &'a str,
    pub price: &'a str,
    pub picture: Option<&'a str>,
    pub description: Option<&'a str>,
    pub category_id: i32,
}

/// Blog record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::blogs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BlogRecord {
    pub id: i32,
    pub title: String,
    pub thumbnail: Option<String>,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

/// New blog for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::blogs)]
pub struct NewBlog<'a> {
    pub title: &'a str,
    pub thumbnail: Option<&'a str>,
    pub content: &'a str,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

/// Blog update. A `None` thumbnail keeps the stored one.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = schema::blogs)]
pub struct BlogChanges<'a> {
    pub title: &'a str,
    pub thumbnail: Option<&'a str>,
    pub content: &'a str,
    pub updated_at: &'a str,
}

/// Email subscription record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::email_subscriptions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SubscriptionRecord {
    pub id: i32,
    pub email: String,
    pub subscribed_at: String,
}

/// New subscription for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::email_subscriptions)]
pub struct NewSubscription<'a> {
    pub email: &'a str,
    pub subscribed_at: &'a str,
}
