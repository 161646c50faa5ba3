//! SQLite file backing the key-value store.
//!
//! The database holds a single `kv_entries` table. Its layout is stamped into
//! `PRAGMA user_version` so a file written by a newer build is refused rather
//! than overwritten.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// SQLite failure, tagged with the stage that produced it.
#[derive(Debug)]
pub enum DbError {
    /// Connection could not be opened or configured.
    Open(rusqlite::Error),
    /// Reading or creating the `kv_entries` layout failed.
    Schema(rusqlite::Error),
    /// A single entry read/write failed.
    Entry {
        op: &'static str,
        key: String,
        source: rusqlite::Error,
    },
    /// File was stamped by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
}

impl DbError {
    /// Stable code used in `error_code=` log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Open(_) => "db_open_failed",
            Self::Schema(_) => "db_schema_failed",
            Self::Entry { .. } => "db_entry_failed",
            Self::SchemaTooNew { .. } => "db_schema_too_new",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "cannot open database: {err}"),
            Self::Schema(err) => write!(f, "cannot prepare kv_entries: {err}"),
            Self::Entry { op, key, source } => write!(f, "{op} `{key}` failed: {source}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "database layout v{found} was written by a newer build (this build reads v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) | Self::Schema(err) => Some(err),
            Self::Entry { source, .. } => Some(source),
            Self::SchemaTooNew { .. } => None,
        }
    }
}
