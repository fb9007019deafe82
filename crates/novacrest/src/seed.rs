//! Starter catalog data.
//!
//! Every item is keyed by a natural field (category and product `name`,
//! blog `title`) and only inserted when no row with that key exists, so
//! seeding can be re-run against a live database.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{BlogInput, ProductInput};
use crate::repository::{DbContext, DbError};

/// Errors raised while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed product '{product}' refers to unknown category '{category}'")]
    UnknownCategory { product: String, category: String },
    #[error("database error: {0}")]
    Database(#[from] DbError),
}

/// Rows inserted per table by one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub categories: usize,
    pub products: usize,
    pub blogs: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.categories + self.products + self.blogs
    }
}

const CATEGORIES: &[&str] = &["Electronics", "Clothing", "Books", "Home & Kitchen"];

struct SeedProduct {
    name: &'static str,
    price: f64,
    description: &'static str,
    category: &'static str,
    picture: &'static str,
}

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Smartphone",
        price: 699.99,
        description: "Latest 5G smartphone",
        category: "Electronics",
        picture: "https://example.com/smartphone.jpg",
    },
    SeedProduct {
        name: "T-Shirt",
        price: 19.99,
        description: "Comfortable cotton T-shirt",
        category: "Clothing",
        picture: "https://example.com/tshirt.jpg",
    },
    SeedProduct {
        name: "Cookbook",
        price: 29.99,
        description: "A book full of delicious recipes",
        category: "Books",
        picture: "https://example.com/cookbook.jpg",
    },
];

struct SeedBlog {
    title: &'static str,
    content: &'static str,
    thumbnail: &'static str,
}

const BLOGS: &[SeedBlog] = &[
    SeedBlog {
        title: "The Future of Tech",
        content: "<p>Technology is evolving rapidly...</p>",
        thumbnail: "https://example.com/tech.jpg",
    },
    SeedBlog {
        title: "Fashion Trends in 2025",
        content: "<p>Upcoming fashion trends include...</p>",
        thumbnail: "https://example.com/fashion.jpg",
    },
];

/// Insert the starter categories, products and blog posts that are missing.
pub async fn seed(ctx: &DbContext) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    let categories = ctx.categories();
    for name in CATEGORIES {
        if categories.find_by_name(name).await?.is_none() {
            categories.create(name).await?;
            report.categories += 1;
        } else {
            debug!("Category already present: {}", name);
        }
    }

    let products = ctx.products();
    for item in PRODUCTS {
        if products.exists_by_name(item.name).await? {
            debug!("Product already present: {}", item.name);
            continue;
        }
        let category = categories.find_by_name(item.category).await?.ok_or_else(|| {
            SeedError::UnknownCategory {
                product: item.name.to_string(),
                category: item.category.to_string(),
            }
        })?;
        products
            .create(ProductInput {
                name: item.name.to_string(),
                price: item.price,
                description: Some(item.description.to_string()),
                category_id: category.id,
                picture: Some(item.picture.to_string()),
            })
            .await?;
        report.products += 1;
    }

    let blogs = ctx.blogs();
    for item in BLOGS {
        if blogs.exists_by_title(item.title).await? {
            debug!("Blog already present: {}", item.title);
            continue;
        }
        blogs
            .create(BlogInput {
                title: item.title.to_string(),
                content: item.content.to_string(),
                thumbnail: Some(item.thumbnail.to_string()),
            })
            .await?;
        report.blogs += 1;
    }

    info!(
        "Seeded {} categories, {} products, {} blogs",
        report.categories, report.products, report.blogs
    );
    Ok(report)
}
