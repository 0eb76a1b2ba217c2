//! HTTP error mapping.
//!
//! Client errors keep their message; internal failures are logged with
//! detail and answered with a generic body.

use crate::dto::ErrorBody;
use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use blog_core::db::DbError;
use blog_core::StoreError;
use log::{error, warn};
use std::fmt;

const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Debug)]
pub enum ApiError {
    /// 404: the target or a referenced entity does not exist.
    NotFound(String),
    /// 422: body, path or query failed parsing or field validation.
    Validation(String),
    /// 409: uniqueness violation.
    Conflict(String),
    /// 500: storage or runtime failure. The message is never sent.
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) | ApiError::Validation(msg) | ApiError::Conflict(msg) => {
                f.write_str(msg)
            }
            ApiError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = match self {
            ApiError::Internal(_) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody { detail })
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::Validation(_) => ApiError::Validation(err.to_string()),
            StoreError::Conflict(_) => ApiError::Conflict(err.to_string()),
            other => {
                error!(
                    "event=request_failed module=http status=error error_code={} error={}",
                    other.code(),
                    other
                );
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        error!(
            "event=session_open module=http status=error error_code=db_open_failed error={}",
            err
        );
        ApiError::Internal(err.to_string())
    }
}

fn rejected_input(source: &'static str, details: String) -> actix_web::Error {
    warn!(
        "event=request_rejected module=http status=rejected source={} error={}",
        source, details
    );
    ApiError::Validation(details).into()
}

/// Malformed JSON bodies are 422, like field validation failures.
pub(crate) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| rejected_input("body", err.to_string()))
}

/// Identifiers that do not parse as UUIDs are 422; unknown UUIDs are 404.
pub(crate) fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| rejected_input("path", err.to_string()))
}

pub(crate) fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| rejected_input("query", err.to_string()))
}
