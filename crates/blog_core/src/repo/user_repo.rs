//! User repository contract and SQLite implementation.
//!
//! # Invariants
//! - `delete_user` removes only the user row; dependent posts and comments
//!   must already be gone or the foreign-key check fails.

use super::{parse_uuid, RepoError, RepoResult};
use crate::model::user::User;
use crate::model::{EntityId, EntityKind};
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT
    uuid,
    username,
    email,
    hashed_password
FROM users";

/// Repository interface for user persistence.
pub trait UserRepository {
    fn insert_user(&self, user: &User) -> RepoResult<()>;
    fn get_user(&self, id: EntityId) -> RepoResult<Option<User>>;
    fn update_user(&self, user: &User) -> RepoResult<()>;
    /// Returns the number of removed rows (0 or 1).
    fn delete_user(&self, id: EntityId) -> RepoResult<usize>;
    fn user_exists(&self, id: EntityId) -> RepoResult<bool>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn insert_user(&self, user: &User) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO users (uuid, username, email, hashed_password)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                user.id.to_string(),
                user.username.as_str(),
                user.email.as_str(),
                user.password_hash.as_str(),
            ],
        )?;
        Ok(())
    }

    fn get_user(&self, id: EntityId) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }

    fn update_user(&self, user: &User) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE users
             SET
                username = ?1,
                email = ?2,
                hashed_password = ?3
             WHERE uuid = ?4;",
            params![
                user.username.as_str(),
                user.email.as_str(),
                user.password_hash.as_str(),
                user.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::User,
                id: user.id,
            });
        }
        Ok(())
    }

    fn delete_user(&self, id: EntityId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM users WHERE uuid = ?1;", [id.to_string()])?;
        Ok(removed)
    }

    fn user_exists(&self, id: EntityId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM users WHERE uuid = ?1;",
                [id.to_string()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let uuid_text: String = row.get("uuid")?;
    Ok(User {
        id: parse_uuid(&uuid_text, "users.uuid")?,
        username: row.get("username")?,
        email: row.get("email")?,
        password_hash: row.get("hashed_password")?,
    })
}
