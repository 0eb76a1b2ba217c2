//! Core domain logic for the blog backend.
//! This crate is the single source of truth for entity and cascade invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod security;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::comment::{Comment, CommentUpdate, NewComment};
pub use model::post::{NewPost, Post, PostUpdate};
pub use model::user::{NewUser, User, UserUpdate};
pub use model::validation::ValidationError;
pub use model::{EntityId, EntityKind};
pub use repo::{RepoError, RepoResult};
pub use service::entity_store::{DeleteReport, EntityStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
