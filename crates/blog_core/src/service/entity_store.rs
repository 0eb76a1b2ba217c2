//! Entity store: the use-case API over users, posts and comments.
//!
//! # Responsibility
//! - Run every mutation in one IMMEDIATE transaction on the caller's session.
//! - Enforce referential checks on create and explicit cascades on delete.
//! - Apply sparse updates through the per-entity merge functions.
//!
//! # Invariants
//! - A failed operation leaves no partial writes (the transaction is dropped
//!   uncommitted).
//! - Deleting an absent id is `NotFound`; nothing is removed.
//! - Passwords are hashed before they reach a repository.

use crate::model::comment::{Comment, CommentUpdate, NewComment};
use crate::model::post::{NewPost, Post, PostUpdate};
use crate::model::user::{NewUser, User, UserUpdate};
use crate::model::validation::ValidationError;
use crate::model::{new_entity_id, EntityId, EntityKind};
use crate::repo::comment_repo::{CommentRepository, SqliteCommentRepository};
use crate::repo::post_repo::{PostRepository, SqlitePostRepository};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::RepoError;
use crate::security::password::{hash_password, verify_password, PasswordError};
use log::{debug, error, info, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error taxonomy surfaced by store operations.
#[derive(Debug)]
pub enum StoreError {
    /// The target entity, or an entity it references, does not exist.
    NotFound { kind: EntityKind, id: EntityId },
    /// A field violates a length or format rule.
    Validation(ValidationError),
    /// A uniqueness constraint was violated.
    Conflict(String),
    /// Password hashing or verification backend failure.
    Password(PasswordError),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// A row written in this transaction could not be read back.
    InconsistentState(&'static str),
}

impl StoreError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Validation(_) => "validation",
            Self::Conflict(_) => "conflict",
            Self::Password(_) => "password",
            Self::Repo(_) => "repo",
            Self::InconsistentState(_) => "inconsistent_state",
        }
    }

    /// Returns whether the error was caused by caller input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Validation(_) | Self::Conflict(_)
        )
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, .. } => write!(f, "{} not found", kind.label()),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Conflict(details) => write!(f, "conflict: {details}"),
            Self::Password(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent store state: {details}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Password(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            other if other.is_unique_violation() => Self::Conflict(other.to_string()),
            other => Self::Repo(other),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        RepoError::from(value).into()
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PasswordError> for StoreError {
    fn from(value: PasswordError) -> Self {
        Self::Password(value)
    }
}

/// Rows removed by a delete, including cascaded children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub posts_removed: usize,
    pub comments_removed: usize,
}

/// Store facade bound to one session (connection) for its whole lifetime.
pub struct EntityStore<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> EntityStore<'conn> {
    /// Wraps a migrated connection.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// Creates a user with a freshly hashed password.
    pub fn create_user(&mut self, input: NewUser) -> StoreResult<User> {
        observe("user_create", || {
            input.validate()?;
            let user = User {
                id: new_entity_id(),
                password_hash: hash_password(&input.password)?,
                username: input.username,
                email: input.email,
            };
            self.write(|tx| {
                SqliteUserRepository::new(tx).insert_user(&user)?;
                Ok(())
            })?;
            Ok(user)
        })
    }

    pub fn get_user(&self, id: EntityId) -> StoreResult<User> {
        SqliteUserRepository::new(self.conn)
            .get_user(id)?
            .ok_or(StoreError::NotFound {
                kind: EntityKind::User,
                id,
            })
    }

    /// Applies the fields present in `update`; a new password is re-hashed.
    pub fn update_user(&mut self, id: EntityId, update: UserUpdate) -> StoreResult<User> {
        observe("user_update", || {
            update.validate()?;
            self.write(|tx| {
                let repo = SqliteUserRepository::new(tx);
                let mut user = repo.get_user(id)?.ok_or(StoreError::NotFound {
                    kind: EntityKind::User,
                    id,
                })?;
                update.merge_into(&mut user, hash_password)?;
                repo.update_user(&user)?;
                Ok(user)
            })
        })
    }

    /// Removes the user, every post they wrote, every comment on those
    /// posts and every comment they wrote elsewhere.
    pub fn delete_user(&mut self, id: EntityId) -> StoreResult<DeleteReport> {
        observe("user_delete", || {
            self.write(|tx| {
                let users = SqliteUserRepository::new(tx);
                let posts = SqlitePostRepository::new(tx);
                let comments = SqliteCommentRepository::new(tx);

                if !users.user_exists(id)? {
                    return Err(StoreError::NotFound {
                        kind: EntityKind::User,
                        id,
                    });
                }

                let comments_removed = comments.delete_comments_on_posts_by_author(id)?
                    + comments.delete_comments_by_author(id)?;
                let posts_removed = posts.delete_posts_by_author(id)?;
                users.delete_user(id)?;

                info!(
                    "event=user_delete_cascade module=store user_id={} posts_removed={} comments_removed={}",
                    id, posts_removed, comments_removed
                );
                Ok(DeleteReport {
                    posts_removed,
                    comments_removed,
                })
            })
        })
    }

    /// Checks a plaintext candidate against the stored hash.
    pub fn verify_user_password(&self, id: EntityId, password: &str) -> StoreResult<bool> {
        let user = self.get_user(id)?;
        Ok(verify_password(password, &user.password_hash)?)
    }

    /// Creates a post owned by `author_id`, which must be an existing user.
    pub fn create_post(&mut self, input: NewPost, author_id: EntityId) -> StoreResult<Post> {
        observe("post_create", || {
            input.validate()?;
            self.write(|tx| {
                if !SqliteUserRepository::new(tx).user_exists(author_id)? {
                    return Err(StoreError::NotFound {
                        kind: EntityKind::User,
                        id: author_id,
                    });
                }

                let posts = SqlitePostRepository::new(tx);
                let id = new_entity_id();
                posts.insert_post(id, author_id, &input)?;
                posts.get_post(id)?.ok_or(StoreError::InconsistentState(
                    "created post not found in read-back",
                ))
            })
        })
    }

    pub fn get_post(&self, id: EntityId) -> StoreResult<Post> {
        SqlitePostRepository::new(self.conn)
            .get_post(id)?
            .ok_or(StoreError::NotFound {
                kind: EntityKind::Post,
                id,
            })
    }

    pub fn update_post(&mut self, id: EntityId, update: PostUpdate) -> StoreResult<Post> {
        observe("post_update", || {
            update.validate()?;
            self.write(|tx| {
                let repo = SqlitePostRepository::new(tx);
                let mut post = repo.get_post(id)?.ok_or(StoreError::NotFound {
                    kind: EntityKind::Post,
                    id,
                })?;
                update.merge_into(&mut post);
                repo.update_post(&post)?;
                Ok(post)
            })
        })
    }

    /// Removes the post and every comment attached to it.
    pub fn delete_post(&mut self, id: EntityId) -> StoreResult<DeleteReport> {
        observe("post_delete", || {
            self.write(|tx| {
                let posts = SqlitePostRepository::new(tx);
                if !posts.post_exists(id)? {
                    return Err(StoreError::NotFound {
                        kind: EntityKind::Post,
                        id,
                    });
                }

                let comments_removed =
                    SqliteCommentRepository::new(tx).delete_comments_by_post(id)?;
                let posts_removed = posts.delete_post(id)?;
                Ok(DeleteReport {
                    posts_removed,
                    comments_removed,
                })
            })
        })
    }

    /// Creates a comment; both the post and the author must exist.
    pub fn create_comment(
        &mut self,
        input: NewComment,
        author_id: EntityId,
    ) -> StoreResult<Comment> {
        observe("comment_create", || {
            input.validate()?;
            self.write(|tx| {
                if !SqlitePostRepository::new(tx).post_exists(input.post_id)? {
                    return Err(StoreError::NotFound {
                        kind: EntityKind::Post,
                        id: input.post_id,
                    });
                }
                if !SqliteUserRepository::new(tx).user_exists(author_id)? {
                    return Err(StoreError::NotFound {
                        kind: EntityKind::User,
                        id: author_id,
                    });
                }

                let comments = SqliteCommentRepository::new(tx);
                let id = new_entity_id();
                comments.insert_comment(id, author_id, &input)?;
                comments.get_comment(id)?.ok_or(StoreError::InconsistentState(
                    "created comment not found in read-back",
                ))
            })
        })
    }

    pub fn get_comment(&self, id: EntityId) -> StoreResult<Comment> {
        SqliteCommentRepository::new(self.conn)
            .get_comment(id)?
            .ok_or(StoreError::NotFound {
                kind: EntityKind::Comment,
                id,
            })
    }

    pub fn update_comment(
        &mut self,
        id: EntityId,
        update: CommentUpdate,
    ) -> StoreResult<Comment> {
        observe("comment_update", || {
            update.validate()?;
            self.write(|tx| {
                let repo = SqliteCommentRepository::new(tx);
                let mut comment = repo.get_comment(id)?.ok_or(StoreError::NotFound {
                    kind: EntityKind::Comment,
                    id,
                })?;
                update.merge_into(&mut comment);
                repo.update_comment(&comment)?;
                Ok(comment)
            })
        })
    }

    pub fn delete_comment(&mut self, id: EntityId) -> StoreResult<DeleteReport> {
        observe("comment_delete", || {
            self.write(|tx| {
                let comments_removed = SqliteCommentRepository::new(tx).delete_comment(id)?;
                if comments_removed == 0 {
                    return Err(StoreError::NotFound {
                        kind: EntityKind::Comment,
                        id,
                    });
                }
                Ok(DeleteReport {
                    posts_removed: 0,
                    comments_removed,
                })
            })
        })
    }

    /// Runs `op` in an IMMEDIATE transaction, committing only on `Ok`.
    fn write<T>(
        &mut self,
        op: impl FnOnce(&Transaction<'_>) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = op(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

fn observe<T>(event: &'static str, op: impl FnOnce() -> StoreResult<T>) -> StoreResult<T> {
    let started_at = Instant::now();
    let result = op();
    let duration_ms = started_at.elapsed().as_millis();

    match &result {
        Ok(_) => info!(
            "event={} module=store status=ok duration_ms={}",
            event, duration_ms
        ),
        Err(StoreError::NotFound { kind, id }) => debug!(
            "event={} module=store status=rejected duration_ms={} error_code=not_found entity={} id={}",
            event,
            duration_ms,
            kind.as_str(),
            id
        ),
        Err(err) if err.is_client_error() => warn!(
            "event={} module=store status=rejected duration_ms={} error_code={}",
            event,
            duration_ms,
            err.code()
        ),
        Err(err) => error!(
            "event={} module=store status=error duration_ms={} error_code={} error={}",
            event,
            duration_ms,
            err.code(),
            err
        ),
    }

    result
}
