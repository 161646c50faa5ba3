//! SQLite-backed key-value store over the `kv_entries` table.

use super::{KeyValueStore, KvError, KvResult};
use crate::db::schema::has_kv_entries;
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store borrowing a connection from `db::open_db*`.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Constructs a store from a bootstrapped connection.
    ///
    /// Rejects connections that were not opened through `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> KvResult<Self> {
        if !has_kv_entries(conn)? {
            return Err(KvError::Unavailable(
                "missing required table `kv_entries`".to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|source| entry_error("get", key, source))?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )
        .map_err(|source| entry_error("set", key, source))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])
            .map_err(|source| entry_error("remove", key, source))?;
        Ok(())
    }
}

fn entry_error(op: &'static str, key: &str, source: rusqlite::Error) -> KvError {
    KvError::Db(DbError::Entry {
        op,
        key: key.to_string(),
        source,
    })
}
