//! Request/response shapes that are not domain records.

use blog_core::{EntityId, EntityKind};
use serde::{Deserialize, Serialize};

/// Query string carrying the caller-supplied author of a new post or comment.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AuthorQuery {
    pub author_id: EntityId,
}

/// Body returned by successful deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: bool,
    pub message: String,
}

impl StatusMessage {
    pub fn deleted(kind: EntityKind) -> Self {
        Self {
            status: true,
            message: format!("{} has been deleted", kind.label()),
        }
    }
}

/// Body returned by every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
