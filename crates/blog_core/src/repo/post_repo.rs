//! Post repository contract and SQLite implementation.

use super::{parse_uuid, RepoError, RepoResult};
use crate::model::post::{NewPost, Post};
use crate::model::{EntityId, EntityKind};
use rusqlite::{params, Connection, OptionalExtension, Row};

const POST_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    content,
    created_at,
    author_uuid
FROM posts";

/// Repository interface for post persistence.
pub trait PostRepository {
    /// Inserts a post; `created_at` is assigned by the storage default.
    fn insert_post(&self, id: EntityId, author_id: EntityId, input: &NewPost) -> RepoResult<()>;
    fn get_post(&self, id: EntityId) -> RepoResult<Option<Post>>;
    /// Writes title and content. Author and timestamp are never rewritten.
    fn update_post(&self, post: &Post) -> RepoResult<()>;
    fn delete_post(&self, id: EntityId) -> RepoResult<usize>;
    fn delete_posts_by_author(&self, author_id: EntityId) -> RepoResult<usize>;
    fn post_exists(&self, id: EntityId) -> RepoResult<bool>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn insert_post(&self, id: EntityId, author_id: EntityId, input: &NewPost) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO posts (uuid, title, content, author_uuid)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                id.to_string(),
                input.title.as_str(),
                input.content.as_str(),
                author_id.to_string(),
            ],
        )?;
        Ok(())
    }

    fn get_post(&self, id: EntityId) -> RepoResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_post_row(row)?));
        }
        Ok(None)
    }

    fn update_post(&self, post: &Post) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE posts
             SET
                title = ?1,
                content = ?2
             WHERE uuid = ?3;",
            params![post.title.as_str(), post.content.as_str(), post.id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Post,
                id: post.id,
            });
        }
        Ok(())
    }

    fn delete_post(&self, id: EntityId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM posts WHERE uuid = ?1;", [id.to_string()])?;
        Ok(removed)
    }

    fn delete_posts_by_author(&self, author_id: EntityId) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM posts WHERE author_uuid = ?1;",
            [author_id.to_string()],
        )?;
        Ok(removed)
    }

    fn post_exists(&self, id: EntityId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM posts WHERE uuid = ?1;",
                [id.to_string()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let uuid_text: String = row.get("uuid")?;
    let author_text: String = row.get("author_uuid")?;
    Ok(Post {
        id: parse_uuid(&uuid_text, "posts.uuid")?,
        title: row.get("title")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        author_id: parse_uuid(&author_text, "posts.author_uuid")?,
    })
}
