//! Comment domain model.

use super::validation::{check_max_len, ValidationError, COMMENT_CONTENT_MAX_CHARS};
use super::EntityId;
use serde::{Deserialize, Serialize};

/// Stored comment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: EntityId,
    pub content: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub author_id: EntityId,
    pub post_id: EntityId,
}

/// Input for comment creation. The author is supplied separately by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewComment {
    pub content: String,
    pub post_id: EntityId,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_max_len("content", &self.content, COMMENT_CONTENT_MAX_CHARS)
    }
}

/// Sparse comment update; only content is mutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommentUpdate {
    #[serde(default)]
    pub content: Option<String>,
}

impl CommentUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.content.as_deref() {
            Some(content) => check_max_len("content", content, COMMENT_CONTENT_MAX_CHARS),
            None => Ok(()),
        }
    }

    pub fn merge_into(self, target: &mut Comment) {
        if let Some(content) = self.content {
            target.content = content;
        }
    }
}
