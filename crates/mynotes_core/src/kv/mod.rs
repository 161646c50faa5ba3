//! Key-value storage contract and implementations.
//!
//! # Responsibility
//! - Provide get/set/remove of whole string values by string key.
//! - Isolate SQLite details from the note store.
//!
//! # Invariants
//! - `set` replaces the entire value atomically; there is no partial write.
//! - `get` on an absent key is `Ok(None)`, never an error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type KvResult<T> = Result<T, KvError>;

/// Storage-layer failure.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Backend refused the operation (e.g. injected failure, poisoned lock).
    Unavailable(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Whole-value string storage keyed by string.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> KvResult<()>;
    /// Deletes `key`; an absent key is `Ok(())`.
    ///
    /// The note store never calls this: clearing notes writes `[]`. It is
    /// part of the contract for backends shared with other app state.
    fn remove(&self, key: &str) -> KvResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        (**self).remove(key)
    }
}
