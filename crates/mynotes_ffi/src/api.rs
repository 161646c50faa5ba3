//! FFI use-case API for the mobile screens.
//!
//! # Responsibility
//! - Expose one function per screen action (entry, dashboard, editor, detail).
//! - Translate store errors into the generic alerts the UI shows.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Background reads never fail: they degrade to empty/`None`.
//! - Store access is serialized process-wide; each call opens its own
//!   connection to the configured database.

use log::warn;
use mynotes_core::db::open_db;
use mynotes_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, CoreConfig,
    DashboardView, Note, NoteDraft, NoteId, NoteStore, NoteSummary, Priority, PriorityFilter,
    SqliteKvStore, StoreError, UserProfile,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};

const SAVE_FAILED_MESSAGE: &str = "Failed to save note";
const DELETE_FAILED_MESSAGE: &str = "Failed to delete note";
const NAME_RULE_MESSAGE: &str = "Name must be between 1 and 10 characters long";

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE_LOCK: Mutex<()> = Mutex::new(());

/// Exposes core crate version.
///
/// # FFI contract
/// - Sync call, non-blocking. Never throws.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// # FFI contract
/// - `level`: `trace|debug|info|warn|error`, case-insensitive.
/// - `log_dir`: absolute directory for rolling log files.
/// - Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic result envelope for user-initiated actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Affected note id, when the action targets a note.
    pub note_id: Option<String>,
    /// Alert text on failure, confirmation on success.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, note_id: Option<String>) -> Self {
        Self {
            ok: true,
            note_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Dashboard card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub note_id: String,
    pub title: String,
    pub date: String,
    /// `Important|Normal|Reminder`.
    pub priority: String,
    /// Hex accent color for the priority stripe.
    pub color: String,
    pub preview: String,
}

/// Filter button with its badge count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBadge {
    /// `All|Important|Normal|Reminder`.
    pub label: String,
    pub count: u32,
    pub selected: bool,
}

/// Dashboard envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardResponse {
    /// Greeting name, empty when no profile is stored.
    pub user_name: String,
    pub items: Vec<NoteCard>,
    pub filters: Vec<FilterBadge>,
}

/// Full note for the detail and editor screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDetail {
    pub note_id: String,
    pub title: String,
    /// Rich-text markup, passed to the editor verbatim.
    pub content: String,
    pub priority: String,
    pub color: String,
    pub date: String,
    pub created_at: String,
}

/// Entry screen: stores the user's name.
///
/// # FFI contract
/// - Sync call, DB-backed. Never panics.
/// - Invalid names fail with the name-rule alert; nothing is written.
#[flutter_rust_bridge::frb(sync)]
pub fn user_enter(name: String) -> ActionResponse {
    let profile = match UserProfile::new(&name) {
        Ok(profile) => profile,
        Err(_) => return ActionResponse::failure(NAME_RULE_MESSAGE),
    };
    match with_store(|store| store.save_user(&profile)) {
        Ok(()) => ActionResponse::success("Welcome.", None),
        Err(err) => {
            warn!("event=ffi_user_enter module=ffi status=error error={err}");
            ActionResponse::failure("Failed to save name")
        }
    }
}

/// Returns the stored user name, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn user_current() -> Option<String> {
    with_store(|store| Ok(store.load_user()))
        .unwrap_or_else(|err| {
            log_soft_failure("user_current", &err);
            None
        })
        .map(|profile| profile.name)
}

/// Dashboard: newest-first notes for `filter` plus every filter badge.
///
/// # FFI contract
/// - `filter`: `All` or a priority label; anything else falls back to `All`.
/// - Never fails; storage problems yield an empty dashboard.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_load(filter: String) -> DashboardResponse {
    let filter = PriorityFilter::parse(&filter).unwrap_or_default();
    let (user, view) = with_store(|store| Ok((store.load_user(), store.dashboard(filter))))
        .unwrap_or_else(|err| {
            log_soft_failure("dashboard_load", &err);
            (None, DashboardView::build(&[], filter))
        });

    DashboardResponse {
        user_name: user.map(|profile| profile.name).unwrap_or_default(),
        filters: PriorityFilter::ALL
            .iter()
            .map(|candidate| FilterBadge {
                label: candidate.label().to_string(),
                count: u32::try_from(view.counts.get(*candidate)).unwrap_or(u32::MAX),
                selected: *candidate == view.filter,
            })
            .collect(),
        items: view.items.iter().map(to_note_card).collect(),
    }
}

/// Detail/editor lookup. `None` when the note does not exist.
#[flutter_rust_bridge::frb(sync)]
pub fn note_get(note_id: String) -> Option<NoteDetail> {
    let id = NoteId::from(note_id.trim());
    with_store(|store| Ok(store.find_note(&id)))
        .unwrap_or_else(|err| {
            log_soft_failure("note_get", &err);
            None
        })
        .map(|note| to_note_detail(&note))
}

/// Editor save: creates when `note_id` is `None`, edits otherwise.
///
/// # FFI contract
/// - `priority`: `Important|Normal|Reminder`; blank means `Normal`.
/// - Failure returns the generic save alert; persisted notes are unchanged.
/// - Editing a note deleted meanwhile succeeds with no `note_id` and no changes.
#[flutter_rust_bridge::frb(sync)]
pub fn note_save(
    note_id: Option<String>,
    title: String,
    content: String,
    priority: String,
) -> ActionResponse {
    let priority = if priority.trim().is_empty() {
        Priority::default()
    } else {
        match Priority::parse(&priority) {
            Some(value) => value,
            None => return ActionResponse::failure(SAVE_FAILED_MESSAGE),
        }
    };
    let draft = NoteDraft {
        title,
        content,
        priority,
    };
    let editing_id = note_id
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(NoteId::from);

    match with_store(|store| store.save_note(&draft, editing_id.as_ref())) {
        Ok(note) => ActionResponse::success("Note saved.", note.map(|note| note.id.to_string())),
        Err(err) => {
            warn!(
                "event=ffi_note_save module=ffi status=error error_code={} error={}",
                err.code(),
                err
            );
            ActionResponse::failure(SAVE_FAILED_MESSAGE)
        }
    }
}

/// Detail delete. Deleting an unknown id succeeds without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(note_id: String) -> ActionResponse {
    let id = NoteId::from(note_id.trim());
    match with_store(|store| store.delete_note(&id)) {
        Ok(_) => ActionResponse::success("Note deleted.", Some(id.to_string())),
        Err(err) => {
            warn!(
                "event=ffi_note_delete module=ffi status=error error_code={} error={}",
                err.code(),
                err
            );
            ActionResponse::failure(DELETE_FAILED_MESSAGE)
        }
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| CoreConfig::from_env().db_path)
        .clone()
}

fn with_store<T>(
    f: impl FnOnce(&NoteStore<SqliteKvStore<'_>>) -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    let _guard = STORE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let conn = open_db(resolve_db_path()).map_err(|err| StoreError::Storage(err.into()))?;
    let kv = SqliteKvStore::try_new(&conn)?;
    let store = NoteStore::new(kv);
    f(&store)
}

fn log_soft_failure(operation: &str, err: &StoreError) {
    warn!(
        "event=ffi_{} module=ffi status=error error_code={} error={}",
        operation,
        err.code(),
        err
    );
}

fn to_note_card(summary: &NoteSummary) -> NoteCard {
    NoteCard {
        note_id: summary.id.to_string(),
        title: summary.title.clone(),
        date: summary.date.clone(),
        priority: summary.priority.label().to_string(),
        color: summary.priority.accent_color().to_string(),
        preview: summary.preview.clone().unwrap_or_default(),
    }
}

fn to_note_detail(note: &Note) -> NoteDetail {
    NoteDetail {
        note_id: note.id.to_string(),
        title: note.title.clone(),
        content: note.content.clone(),
        priority: note.priority.label().to_string(),
        color: note.priority.accent_color().to_string(),
        date: note.date.clone(),
        created_at: note.created_at.clone(),
    }
}
