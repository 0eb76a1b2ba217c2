//! Post domain model.
//!
//! # Invariants
//! - `author_id` is set at creation and never changed by an update.
//! - `created_at` is server-assigned (epoch milliseconds).

use super::validation::{check_max_len, ValidationError};
use super::validation::{POST_CONTENT_MAX_CHARS, POST_TITLE_MAX_CHARS};
use super::EntityId;
use serde::{Deserialize, Serialize};

/// Stored post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: EntityId,
    pub title: String,
    pub content: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub author_id: EntityId,
}

/// Input for post creation. The author is supplied separately by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_max_len("title", &self.title, POST_TITLE_MAX_CHARS)?;
        check_max_len("content", &self.content, POST_CONTENT_MAX_CHARS)
    }
}

/// Sparse post update over title and content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl PostUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = self.title.as_deref() {
            check_max_len("title", title, POST_TITLE_MAX_CHARS)?;
        }
        if let Some(content) = self.content.as_deref() {
            check_max_len("content", content, POST_CONTENT_MAX_CHARS)?;
        }
        Ok(())
    }

    /// Applies present fields onto `target`.
    pub fn merge_into(self, target: &mut Post) {
        if let Some(title) = self.title {
            target.title = title;
        }
        if let Some(content) = self.content {
            target.content = content;
        }
    }
}
