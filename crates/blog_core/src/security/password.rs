//! Salted one-way password hashing.
//!
//! # Responsibility
//! - Hash plaintext passwords with Argon2id and a random per-password salt.
//! - Verify plaintext candidates against stored PHC strings.
//!
//! # Invariants
//! - Plaintext never leaves this module in any form other than a hash.
//! - Errors never include the plaintext.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Hashing backend failure.
#[derive(Debug)]
pub enum PasswordError {
    /// The hasher rejected the input or parameters.
    Hash(String),
    /// The stored hash is not a valid PHC string.
    MalformedHash(String),
}

impl Display for PasswordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash(details) => write!(f, "password hashing failed: {details}"),
            Self::MalformedHash(details) => write!(f, "stored password hash is invalid: {details}"),
        }
    }
}

impl Error for PasswordError {}

/// Hashes `password` and returns a PHC-formatted string safe for storage.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordError::Hash(err.to_string()))
}

/// Returns whether `password` matches `password_hash`.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|err| PasswordError::MalformedHash(err.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordError::Hash(err.to_string())),
    }
}
