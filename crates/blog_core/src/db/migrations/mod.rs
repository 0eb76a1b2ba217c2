//! Schema migrations for the blog store.
//!
//! # Invariants
//! - `STEPS` is ordered by version, starting at 1 with no gaps.
//! - `PRAGMA user_version` always equals the last step applied.
//! - All pending steps run in one IMMEDIATE transaction; a failing step
//!   leaves the schema at its previous version.
//! - Connections racing on a fresh file migrate it once; the others see the
//!   committed version after taking the write lock.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{Connection, Transaction, TransactionBehavior};

struct Step {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[Step] = &[
    Step {
        version: 1,
        name: "init",
        sql: include_str!("0001_init.sql"),
    },
    Step {
        version: 2,
        name: "lookup_indexes",
        sql: include_str!("0002_lookup_indexes.sql"),
    },
];

/// Highest schema version this build can create or open.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
/// - `Sqlite` when a step fails; nothing from the batch is kept.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let to = latest_version();
    if check_version(conn, to)? == to {
        debug!("event=db_migrate module=db status=skipped version={}", to);
        return Ok(());
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    // Another session may have migrated while this one waited for the lock.
    let from = check_version(&tx, to)?;
    if from == to {
        debug!("event=db_migrate module=db status=skipped version={}", to);
        return Ok(());
    }

    STEPS
        .iter()
        .filter(|step| step.version > from)
        .try_for_each(|step| run_step(&tx, step))?;
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        from, to
    );
    Ok(())
}

fn check_version(conn: &Connection, latest: u32) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    if version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: version,
            latest_supported: latest,
        });
    }
    Ok(version)
}

fn run_step(tx: &Transaction<'_>, step: &Step) -> DbResult<()> {
    tx.execute_batch(step.sql)?;
    // PRAGMA does not accept bound parameters.
    tx.execute_batch(&format!("PRAGMA user_version = {};", step.version))?;
    debug!(
        "event=db_migrate_step module=db status=ok version={} name={}",
        step.version, step.name
    );
    Ok(())
}
