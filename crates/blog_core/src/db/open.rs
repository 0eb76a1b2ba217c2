//! Connection bootstrap.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a busy timeout, so
//!   concurrent request sessions wait for the write lock instead of failing.
//! - Returned connections are migrated.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{debug, error};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if needed) the database file at `path`.
///
/// The HTTP layer calls this once per request, so success is logged at
/// `debug` and failures at `error`.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with("file", || {
        Connection::open(path).map_err(|source| DbError::Open {
            path: path.to_path_buf(),
            source,
        })
    })
}

/// Opens a private in-memory database; used by tests.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", || Connection::open_in_memory().map_err(DbError::from))
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> DbResult<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    let result = connect().and_then(|mut conn| {
        prepare(&mut conn)?;
        Ok(conn)
    });
    let duration_ms = started_at.elapsed().as_millis();

    match &result {
        Ok(_) => debug!(
            "event=db_open module=db status=ok mode={} duration_ms={}",
            mode, duration_ms
        ),
        Err(err) => {
            let error_code = match err {
                DbError::Open { .. } => "db_open_failed",
                _ => "db_bootstrap_failed",
            };
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code={} error={}",
                mode, duration_ms, error_code, err
            );
        }
    }
    result
}

fn prepare(conn: &mut Connection) -> DbResult<()> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}
