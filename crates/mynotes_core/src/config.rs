//! Process configuration resolved from environment variables.
//!
//! | variable            | meaning                         | default                         |
//! |---------------------|---------------------------------|---------------------------------|
//! | `MYNOTES_DB_PATH`   | SQLite file backing the store   | `<temp_dir>/mynotes.sqlite3`    |
//! | `MYNOTES_LOG_LEVEL` | `trace|debug|info|warn|error`   | [`default_log_level`]           |
//! | `MYNOTES_LOG_DIR`   | absolute directory for log files | unset (file logging disabled)  |
//!
//! Blank values are treated as unset.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "MYNOTES_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "MYNOTES_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "MYNOTES_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "mynotes.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}
