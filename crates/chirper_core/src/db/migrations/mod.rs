//! Schema steps for the chirper database.
//!
//! Each step is tagged with the `PRAGMA user_version` it leaves behind.
//! Pending steps run in one transaction, so a failing step keeps the
//! database at the version it had before the call.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, Transaction};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const SCHEMA: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Schema version a fully migrated database reports.
pub fn latest_version() -> u32 {
    SCHEMA.last().map_or(0, |step| step.version)
}

/// Reads `PRAGMA user_version` from `conn`.
pub fn schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the database is ahead of this
///   build.
/// - `DbError::Migration` naming the step that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    migrate(conn, SCHEMA)
}

fn migrate(conn: &mut Connection, steps: &[Migration]) -> DbResult<()> {
    let from = schema_version(conn)?;
    let target = steps.last().map_or(0, |step| step.version);

    if from > target {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: target,
        });
    }

    let mut pending = steps.iter().filter(|step| step.version > from).peekable();
    if pending.peek().is_none() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        if let Err(source) = run_step(&tx, step) {
            error!(
                "event=db_migrate module=db status=error from_version={} failed_version={}",
                from, step.version
            );
            return Err(DbError::Migration {
                version: step.version,
                source,
            });
        }
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from} to_version={target}");
    Ok(())
}

fn run_step(tx: &Transaction<'_>, step: &Migration) -> rusqlite::Result<()> {
    tx.execute_batch(step.sql)?;
    tx.pragma_update(None, "user_version", step.version)
}
