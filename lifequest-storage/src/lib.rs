//! DuckDB storage layer for the LifeQuest gamification core.
//!
//! Persists user stats, the quest/achievement catalogs, per-user progress
//! and unlock rows, and the append-only life-balance history. The schema
//! carries the uniqueness constraints the progression engine relies on:
//! (user, achievement) unlock rows are a primary key so a raced unlock
//! collapses into a no-op insert, and quest claims run stat update and
//! row delete inside one transaction.

mod error;
mod game_store;

pub use error::{StorageError, StorageResult};
pub use game_store::GameStore;

/// Open a DuckDB connection with stale WAL recovery and resource limits.
///
/// If the initial open fails and a `.wal` file exists alongside the
/// database, it is removed and the open retried once — an unclean shutdown
/// can leave a WAL file that prevents reopening. `memory_limit` and
/// `threads` cap per-database resource usage (DuckDB defaults to most of
/// system RAM and every core).
pub fn open_duckdb_with_wal_recovery(
    path: &std::path::Path,
    memory_limit: &str,
    threads: u32,
) -> StorageResult<duckdb::Connection> {
    let conn = match duckdb::Connection::open(path) {
        Ok(c) => c,
        Err(first_err) => {
            let wal_path = path.with_extension(
                path.extension()
                    .map(|ext| format!("{}.wal", ext.to_string_lossy()))
                    .unwrap_or_else(|| "wal".to_string()),
            );
            if wal_path.exists() {
                tracing::warn!(
                    "DuckDB open failed, removing stale WAL and retrying: {}",
                    wal_path.display()
                );
                if std::fs::remove_file(&wal_path).is_ok() {
                    let c = duckdb::Connection::open(path)?;
                    apply_resource_limits(&c, memory_limit, threads)?;
                    return Ok(c);
                }
            }
            return Err(first_err.into());
        }
    };
    apply_resource_limits(&conn, memory_limit, threads)?;
    Ok(conn)
}

fn apply_resource_limits(
    conn: &duckdb::Connection,
    memory_limit: &str,
    threads: u32,
) -> StorageResult<()> {
    conn.execute_batch(&format!(
        "PRAGMA memory_limit='{}'; PRAGMA threads={};",
        memory_limit, threads
    ))?;
    Ok(())
}
