//! Blog domain model: users, posts and comments.
//!
//! # Responsibility
//! - Define the canonical records handled by the entity store.
//! - Define sparse update inputs and their explicit merge functions.
//!
//! # Invariants
//! - Every entity is identified by a stable random `EntityId`.
//! - Relationships are plain foreign-key fields; there is no live object graph.
//! - Deletion is a hard delete; there are no tombstones.

pub mod comment;
pub mod post;
pub mod user;
pub mod validation;

use uuid::Uuid;

/// Stable identifier shared by users, posts and comments.
pub type EntityId = Uuid;

/// Generates a fresh identifier for a new entity.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}

/// Entity kinds, used to name the subject of not-found errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Post,
    Comment,
}

impl EntityKind {
    /// Lowercase label used in log events and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }

    /// Capitalized label used in client-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Post => "Post",
            Self::Comment => "Comment",
        }
    }
}
