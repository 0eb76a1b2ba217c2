//! Per-request store sessions.
//!
//! # Invariants
//! - One connection per request, opened on a blocking worker and dropped when
//!   the operation returns.
//! - Store operations commit or roll back inside that connection; nothing is
//!   cached across requests.

use crate::error::ApiError;
use actix_web::web;
use blog_core::db::open_db;
use blog_core::{EntityStore, StoreResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Opens an `EntityStore` session per request against one database file.
#[derive(Debug, Clone)]
pub struct SessionFactory {
    db_path: Arc<PathBuf>,
}

impl SessionFactory {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }

    pub fn db_path(&self) -> &Path {
        self.db_path.as_path()
    }

    /// Runs `op` against a fresh session on the blocking thread pool.
    pub async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&mut EntityStore<'_>) -> StoreResult<T> + Send + 'static,
    {
        let db_path = Arc::clone(&self.db_path);
        web::block(move || -> Result<T, ApiError> {
            let mut conn = open_db(db_path.as_path())?;
            let mut store = EntityStore::new(&mut conn);
            Ok(op(&mut store)?)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("blocking session task failed: {err}")))?
    }
}
