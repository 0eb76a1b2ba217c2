//! User domain model.
//!
//! # Responsibility
//! - Define the stored user record and its create/update inputs.
//! - Own the explicit merge of sparse user updates.
//!
//! # Invariants
//! - `password_hash` is never serialized and never holds plaintext.
//! - A merge only touches fields present in the update.

use super::validation::{check_email, check_max_len, check_not_blank, ValidationError};
use super::validation::USERNAME_MAX_CHARS;
use super::EntityId;
use serde::{Deserialize, Serialize};

/// Stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    /// PHC-formatted salted hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Input for user creation. `password` is plaintext and is hashed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_username(&self.username)?;
        check_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Sparse user update. `None` means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl UserUpdate {
    /// Validates only the fields present in this update.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(username) = self.username.as_deref() {
            validate_username(username)?;
        }
        if let Some(email) = self.email.as_deref() {
            check_email(email)?;
        }
        if let Some(password) = self.password.as_deref() {
            validate_password(password)?;
        }
        Ok(())
    }

    /// Applies present fields onto `target`.
    ///
    /// A present password is passed through `hash_password` and only the
    /// resulting hash is stored. When hashing fails `target` is left as it
    /// was.
    pub fn merge_into<E>(
        self,
        target: &mut User,
        hash_password: impl FnOnce(&str) -> Result<String, E>,
    ) -> Result<(), E> {
        let password_hash = self.password.as_deref().map(hash_password).transpose()?;

        if let Some(username) = self.username {
            target.username = username;
        }
        if let Some(email) = self.email {
            target.email = email;
        }
        if let Some(password_hash) = password_hash {
            target.password_hash = password_hash;
        }
        Ok(())
    }
}

fn validate_username(value: &str) -> Result<(), ValidationError> {
    check_not_blank("username", value)?;
    check_max_len("username", value, USERNAME_MAX_CHARS)
}

fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Blank { field: "password" });
    }
    Ok(())
}
