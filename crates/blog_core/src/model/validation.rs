//! Field validation rules shared by create and update inputs.
//!
//! # Invariants
//! - Length limits count Unicode scalar values, matching SQLite `length()`.
//! - Rules are applied before any SQL mutation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const USERNAME_MAX_CHARS: usize = 255;
pub const EMAIL_MAX_CHARS: usize = 255;
pub const POST_TITLE_MAX_CHARS: usize = 255;
pub const POST_CONTENT_MAX_CHARS: usize = 2048;
pub const COMMENT_CONTENT_MAX_CHARS: usize = 1024;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").expect("valid email regex"));

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty or whitespace only.
    Blank { field: &'static str },
    /// Field exceeds its maximum length in characters.
    TooLong { field: &'static str, max: usize },
    /// Email does not look like `local@domain.tld`.
    MalformedEmail,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank { field } => write!(f, "{field} must not be blank"),
            Self::TooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Self::MalformedEmail => write!(f, "email is not a valid address"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn check_max_len(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

pub(crate) fn check_not_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(())
}

pub(crate) fn check_email(value: &str) -> Result<(), ValidationError> {
    check_max_len("email", value, EMAIL_MAX_CHARS)?;
    if !EMAIL_RE.is_match(value) {
        return Err(ValidationError::MalformedEmail);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_email, check_max_len, check_not_blank, ValidationError};

    #[test]
    fn email_accepts_plain_addresses() {
        assert!(check_email("ada@example.com").is_ok());
        assert!(check_email("first.last+tag@mail.example.org").is_ok());
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        for value in ["", "ada", "ada@", "@example.com", "ada@example", "a da@example.com"] {
            assert_eq!(
                check_email(value),
                Err(ValidationError::MalformedEmail),
                "`{value}` should be rejected"
            );
        }
    }

    #[test]
    fn email_length_is_checked_before_syntax() {
        let local = "a".repeat(250);
        let err = check_email(&format!("{local}@example.com")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLong {
                field: "email",
                max: 255
            }
        );
    }

    #[test]
    fn max_len_counts_characters_not_bytes() {
        let value = "é".repeat(10);
        assert!(check_max_len("title", &value, 10).is_ok());
        assert!(check_max_len("title", &value, 9).is_err());
    }

    #[test]
    fn blank_rejects_whitespace_only() {
        assert_eq!(
            check_not_blank("username", "  \t"),
            Err(ValidationError::Blank { field: "username" })
        );
    }
}
