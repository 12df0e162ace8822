//! SQLite bootstrap for `SqliteKvStore`.
//!
//! # Responsibility
//! - Open file or in-memory connections with the `kv_entries` table ready.
//!
//! # Invariants
//! - The table layout version lives in `PRAGMA user_version`.
//! - Databases stamped with a newer version are refused, never rewritten.
//! - Existing rows survive re-bootstrap; table creation is `IF NOT EXISTS`.

use crate::repo::kv_store::{KvError, KvResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Layout version of the `kv_entries` table.
pub const KV_SCHEMA_VERSION: u32 = 1;

const KV_SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Opens a database file and prepares the key-value table.
///
/// # Side effects
/// - Emits `kv_open` events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> KvResult<Connection> {
    let started_at = Instant::now();
    let result = Connection::open(path)
        .map_err(KvError::from)
        .and_then(|conn| ensure_kv_schema(&conn).map(|()| conn));
    log_open("file", started_at, result.as_ref().err());
    result
}

/// Opens a private in-memory database with the key-value table ready.
pub fn open_db_in_memory() -> KvResult<Connection> {
    let started_at = Instant::now();
    let result = Connection::open_in_memory()
        .map_err(KvError::from)
        .and_then(|conn| ensure_kv_schema(&conn).map(|()| conn));
    log_open("memory", started_at, result.as_ref().err());
    result
}

/// Creates `kv_entries` when missing and stamps the layout version.
///
/// # Errors
/// - `KvError::UnsupportedSchemaVersion` when the file is from a newer build.
pub fn ensure_kv_schema(conn: &Connection) -> KvResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;

    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if found > KV_SCHEMA_VERSION {
        return Err(KvError::UnsupportedSchemaVersion {
            found,
            supported: KV_SCHEMA_VERSION,
        });
    }
    if found < KV_SCHEMA_VERSION {
        conn.execute_batch(&format!(
            "BEGIN;
             {KV_SCHEMA_SQL}
             PRAGMA user_version = {KV_SCHEMA_VERSION};
             COMMIT;"
        ))?;
        info!("event=kv_schema module=db status=ok from_version={found} to_version={KV_SCHEMA_VERSION}");
    }
    Ok(())
}

fn log_open(mode: &str, started_at: Instant, err: Option<&KvError>) {
    let duration_ms = started_at.elapsed().as_millis();
    match err {
        None => info!("event=kv_open module=db status=ok mode={mode} duration_ms={duration_ms}"),
        Some(err) => error!(
            "event=kv_open module=db status=error mode={mode} duration_ms={duration_ms} error={err}"
        ),
    }
}
