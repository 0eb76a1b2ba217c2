//! Comment repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `comments`.
//! - Provide the bulk removals the store uses when a post or user cascades.

use super::{parse_uuid, RepoError, RepoResult};
use crate::model::comment::{Comment, NewComment};
use crate::model::{EntityId, EntityKind};
use rusqlite::{params, Connection, Row};

const COMMENT_SELECT_SQL: &str = "SELECT
    uuid,
    content,
    created_at,
    author_uuid,
    post_uuid
FROM comments";

/// Repository interface for comment persistence.
pub trait CommentRepository {
    /// Inserts a comment; `created_at` is assigned by the storage default.
    fn insert_comment(
        &self,
        id: EntityId,
        author_id: EntityId,
        input: &NewComment,
    ) -> RepoResult<()>;
    fn get_comment(&self, id: EntityId) -> RepoResult<Option<Comment>>;
    /// Writes content only.
    fn update_comment(&self, comment: &Comment) -> RepoResult<()>;
    fn delete_comment(&self, id: EntityId) -> RepoResult<usize>;
    fn delete_comments_by_post(&self, post_id: EntityId) -> RepoResult<usize>;
    fn delete_comments_by_author(&self, author_id: EntityId) -> RepoResult<usize>;
    /// Removes every comment attached to a post written by `author_id`,
    /// whoever wrote the comment.
    fn delete_comments_on_posts_by_author(&self, author_id: EntityId) -> RepoResult<usize>;
}

/// SQLite-backed comment repository.
pub struct SqliteCommentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCommentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn insert_comment(
        &self,
        id: EntityId,
        author_id: EntityId,
        input: &NewComment,
    ) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO comments (uuid, content, author_uuid, post_uuid)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                id.to_string(),
                input.content.as_str(),
                author_id.to_string(),
                input.post_id.to_string(),
            ],
        )?;
        Ok(())
    }

    fn get_comment(&self, id: EntityId) -> RepoResult<Option<Comment>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMMENT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_comment_row(row)?));
        }
        Ok(None)
    }

    fn update_comment(&self, comment: &Comment) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE comments SET content = ?1 WHERE uuid = ?2;",
            params![comment.content.as_str(), comment.id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Comment,
                id: comment.id,
            });
        }
        Ok(())
    }

    fn delete_comment(&self, id: EntityId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM comments WHERE uuid = ?1;", [id.to_string()])?;
        Ok(removed)
    }

    fn delete_comments_by_post(&self, post_id: EntityId) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM comments WHERE post_uuid = ?1;",
            [post_id.to_string()],
        )?;
        Ok(removed)
    }

    fn delete_comments_by_author(&self, author_id: EntityId) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM comments WHERE author_uuid = ?1;",
            [author_id.to_string()],
        )?;
        Ok(removed)
    }

    fn delete_comments_on_posts_by_author(&self, author_id: EntityId) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM comments
             WHERE post_uuid IN (
                SELECT uuid
                FROM posts
                WHERE author_uuid = ?1
             );",
            [author_id.to_string()],
        )?;
        Ok(removed)
    }
}

fn parse_comment_row(row: &Row<'_>) -> RepoResult<Comment> {
    let uuid_text: String = row.get("uuid")?;
    let author_text: String = row.get("author_uuid")?;
    let post_text: String = row.get("post_uuid")?;
    Ok(Comment {
        id: parse_uuid(&uuid_text, "comments.uuid")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        author_id: parse_uuid(&author_text, "comments.author_uuid")?,
        post_id: parse_uuid(&post_text, "comments.post_uuid")?,
    })
}
