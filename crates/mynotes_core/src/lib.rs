//! Core domain logic for MyNotes.
//! This crate is the single source of truth for note persistence rules.

pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod store;
pub mod view;

pub use config::CoreConfig;
pub use kv::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteDraft, NoteId, Priority, PriorityFilter};
pub use model::user::{UserProfile, UserValidationError};
pub use store::{NoteStore, StoreError, StoreEvent, StoreResult, SubscriptionId};
pub use view::dashboard::{DashboardView, NoteSummary};
pub use view::list::PriorityCounts;
pub use view::preview::preview_text;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
