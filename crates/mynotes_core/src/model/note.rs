//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its JSON wire shape.
//! - Define the three-tier priority and the dashboard filter selector.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `priority` is always one of `Important|Normal|Reminder`.
//! - `date` and `created_at` are set once at creation.

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Freshly minted ids are UUID v4 strings; ids written by earlier app
/// versions (millisecond timestamps) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Mints a new random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visual/filter tier of a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Important,
    #[default]
    Normal,
    /// Serialized as `Reminder`; the first app release wrote `Pense bête`.
    #[serde(alias = "Pense bête")]
    Reminder,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Important, Priority::Normal, Priority::Reminder];

    /// Wire/display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Important => "Important",
            Self::Normal => "Normal",
            Self::Reminder => "Reminder",
        }
    }

    /// Parses a wire label, accepting the legacy reminder label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Important" => Some(Self::Important),
            "Normal" => Some(Self::Normal),
            "Reminder" | "Pense bête" => Some(Self::Reminder),
            _ => None,
        }
    }

    /// Card accent color used by the dashboard list.
    pub fn accent_color(self) -> &'static str {
        match self {
            Self::Important => "#FF0000",
            Self::Normal => "#00FF00",
            Self::Reminder => "#0000FF",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Dashboard filter selector: everything, or one exact priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    /// Every selector in the order the filter bar shows them.
    pub const ALL: [PriorityFilter; 4] = [
        PriorityFilter::All,
        PriorityFilter::Only(Priority::Important),
        PriorityFilter::Only(Priority::Normal),
        PriorityFilter::Only(Priority::Reminder),
    ];

    pub fn matches(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == priority,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(priority) => priority.label(),
        }
    }

    /// Parses `All` or a priority label. No partial matching.
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim() == "All" {
            return Some(Self::All);
        }
        Priority::parse(value).map(Self::Only)
    }
}

/// Editor candidate for a save. Identity and timestamps are owned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    /// Rich-text markup from the editor, stored verbatim.
    pub content: String,
    pub priority: Priority,
}

/// Persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub priority: Priority,
    /// Human-readable creation date (`M/D/YYYY`, local time).
    #[serde(default)]
    pub date: String,
    /// RFC 3339 creation instant. Records from older versions may carry "".
    #[serde(default)]
    pub created_at: String,
}

impl Note {
    /// Mints a note from a draft, stamping id and creation times with `now`.
    pub fn from_draft(id: NoteId, draft: &NoteDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            content: draft.content.clone(),
            priority: draft.priority,
            date: display_date(now),
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Overwrites the user-editable fields, keeping identity and timestamps.
    pub fn apply_draft(&mut self, draft: &NoteDraft) {
        self.title = draft.title.clone();
        self.content = draft.content.clone();
        self.priority = draft.priority;
    }

    /// Parsed `created_at`, or `None` when absent or malformed.
    pub fn created_at_instant(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(self.created_at.trim()).ok()
    }
}

fn display_date(now: DateTime<Utc>) -> String {
    now.with_timezone(&Local).format("%-m/%-d/%Y").to_string()
}
