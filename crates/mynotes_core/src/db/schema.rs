//! `kv_entries` layout bootstrap.
//!
//! # Invariants
//! - After `ensure_kv_schema`, `PRAGMA user_version == KV_SCHEMA_VERSION`.
//! - Existing rows survive bootstrap; the DDL only creates what is missing.

use super::{DbError, DbResult};
use rusqlite::Connection;
use std::cmp::Ordering;

/// Layout version this build reads and writes.
pub const KV_SCHEMA_VERSION: u32 = 1;

const KV_ENTRIES_DDL: &str = include_str!("kv_entries.sql");

/// Version stamped in the file; `0` for a fresh or unstamped database.
pub fn stored_schema_version(conn: &Connection) -> DbResult<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .map_err(DbError::Schema)
}

/// Creates `kv_entries` and stamps the version when the file is older.
///
/// # Errors
/// - `SchemaTooNew` when the file carries a version above ours.
/// - `Schema` when the DDL or the stamp fails; the transaction rolls back.
pub fn ensure_kv_schema(conn: &mut Connection) -> DbResult<()> {
    let found = stored_schema_version(conn)?;
    match found.cmp(&KV_SCHEMA_VERSION) {
        Ordering::Greater => Err(DbError::SchemaTooNew {
            found,
            supported: KV_SCHEMA_VERSION,
        }),
        Ordering::Equal => Ok(()),
        Ordering::Less => {
            let tx = conn.transaction().map_err(DbError::Schema)?;
            tx.execute_batch(KV_ENTRIES_DDL).map_err(DbError::Schema)?;
            tx.pragma_update(None, "user_version", KV_SCHEMA_VERSION)
                .map_err(DbError::Schema)?;
            tx.commit().map_err(DbError::Schema)
        }
    }
}

/// Whether `kv_entries` exists on `conn`.
pub(crate) fn has_kv_entries(conn: &Connection) -> DbResult<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries');",
        [],
        |row| row.get::<_, bool>(0),
    )
    .map_err(DbError::Schema)
}
