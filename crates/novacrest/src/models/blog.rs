//! Blog posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{optional, required, ValidationError};

/// A blog post with HTML content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub thumbnail: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating or updating a blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogInput {
    pub title: String,
    pub content: String,
    /// Thumbnail URL. On update, `None` keeps the stored thumbnail.
    pub thumbnail: Option<String>,
}

impl BlogInput {
    pub fn validated(self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: required(&self.title, "Blog title")?,
            content: required(&self.content, "Blog content")?,
            thumbnail: optional(self.thumbnail.as_deref()),
        })
    }
}
