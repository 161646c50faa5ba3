//! Note Store use-cases.
//!
//! # Responsibility
//! - Own the `notes` and `user` keys; nothing else reads or writes them.
//! - Provide the list/edit/detail/entry screen operations.
//!
//! # Invariants
//! - Every write replaces the whole JSON value under its key.
//! - New notes get an id not present among existing notes.
//! - Editing keeps `id`, `date`, `created_at` and the array order.
//! - Note content and user names are never logged.

use super::events::{Listeners, StoreEvent, SubscriptionId};
use super::{StoreError, StoreResult, NOTES_KEY, USER_KEY};
use crate::kv::KeyValueStore;
use crate::model::note::{Note, NoteDraft, NoteId, PriorityFilter};
use crate::model::user::UserProfile;
use crate::view::dashboard::DashboardView;
use crate::view::list;
use chrono::Utc;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Store facade over a key-value backend.
pub struct NoteStore<S: KeyValueStore> {
    kv: S,
    listeners: Listeners,
}

impl<S: KeyValueStore> NoteStore<S> {
    pub fn new(kv: S) -> Self {
        Self {
            kv,
            listeners: Listeners::default(),
        }
    }

    /// Loads every persisted note in stored order.
    ///
    /// Absent key, storage failure and malformed JSON all yield an empty list;
    /// failures are logged at `warn`.
    pub fn load_all(&self) -> Vec<Note> {
        match self.read_notes() {
            Ok(notes) => notes,
            Err(err) => {
                warn!(
                    "event=notes_load module=store status=error error_code={} error={}",
                    err.code(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Strict read used before user-initiated writes.
    ///
    /// # Errors
    /// - `Storage` when the backend read fails.
    /// - `Serialization` when the stored value is not a note array.
    pub fn read_notes(&self) -> StoreResult<Vec<Note>> {
        Ok(self.read_json::<Vec<Note>>(NOTES_KEY)?.unwrap_or_default())
    }

    /// Finds one note by id; soft like `load_all`.
    pub fn find_note(&self, id: &NoteId) -> Option<Note> {
        self.load_all().into_iter().find(|note| &note.id == id)
    }

    /// Creates a note (`editing_id = None`) or edits one in place, then
    /// persists the full resulting array.
    ///
    /// Returns the array that was written. An `editing_id` matching no note
    /// rewrites the array unchanged, like [`NoteStore::remove`].
    ///
    /// # Errors
    /// - `Storage`/`Serialization` when the write fails; prior value is kept.
    pub fn save(
        &self,
        existing: &[Note],
        draft: &NoteDraft,
        editing_id: Option<&NoteId>,
    ) -> StoreResult<Vec<Note>> {
        self.save_at(existing, draft, editing_id)
            .map(|(notes, _index)| notes)
    }

    /// Editor action: re-reads storage, saves, and returns the saved note.
    ///
    /// `Ok(None)` when `editing_id` no longer names a stored note.
    pub fn save_note(
        &self,
        draft: &NoteDraft,
        editing_id: Option<&NoteId>,
    ) -> StoreResult<Option<Note>> {
        let existing = self.read_notes()?;
        let (mut notes, index) = self.save_at(&existing, draft, editing_id)?;
        Ok(index.map(|index| notes.swap_remove(index)))
    }

    fn save_at(
        &self,
        existing: &[Note],
        draft: &NoteDraft,
        editing_id: Option<&NoteId>,
    ) -> StoreResult<(Vec<Note>, Option<usize>)> {
        let mut notes = existing.to_vec();
        let (index, mode) = match editing_id {
            Some(id) => match notes.iter().position(|note| &note.id == id) {
                Some(index) => {
                    notes[index].apply_draft(draft);
                    (Some(index), "edit")
                }
                None => (None, "noop"),
            },
            None => {
                let id = unused_id(&notes);
                notes.push(Note::from_draft(id, draft, Utc::now()));
                (Some(notes.len() - 1), "create")
            }
        };

        self.write_notes(&notes, "note_save", mode)?;
        Ok((notes, index))
    }

    /// Removes `target_id` and persists the remaining notes.
    ///
    /// An unknown id leaves the content unchanged.
    pub fn remove(&self, existing: &[Note], target_id: &NoteId) -> StoreResult<Vec<Note>> {
        let notes = existing
            .iter()
            .filter(|note| &note.id != target_id)
            .cloned()
            .collect::<Vec<_>>();
        let mode = if notes.len() == existing.len() {
            "noop"
        } else {
            "delete"
        };
        self.write_notes(&notes, "note_delete", mode)?;
        Ok(notes)
    }

    /// Detail action: re-reads storage and removes one note.
    pub fn delete_note(&self, target_id: &NoteId) -> StoreResult<Vec<Note>> {
        let existing = self.read_notes()?;
        self.remove(&existing, target_id)
    }

    /// Dashboard read model for one filter selection.
    pub fn dashboard(&self, filter: PriorityFilter) -> DashboardView {
        DashboardView::build(&self.load_all(), filter)
    }

    /// Newest-first ordering; see [`list::sort_by_recency`].
    pub fn sort_by_recency(notes: &[Note]) -> Vec<Note> {
        list::sort_by_recency(notes)
    }

    /// See [`list::filter_by_priority`].
    pub fn filter_by_priority(notes: &[Note], filter: PriorityFilter) -> Vec<Note> {
        list::filter_by_priority(notes, filter)
    }

    /// See [`list::count_by_priority`].
    pub fn count_by_priority(notes: &[Note], filter: PriorityFilter) -> usize {
        list::count_by_priority(notes, filter)
    }

    /// Loads the profile; soft, `None` when absent or unreadable.
    pub fn load_user(&self) -> Option<UserProfile> {
        match self.read_json::<UserProfile>(USER_KEY) {
            Ok(profile) => profile,
            Err(err) => {
                warn!(
                    "event=user_load module=store status=error error_code={} error={}",
                    err.code(),
                    err
                );
                None
            }
        }
    }

    /// Validates and persists the profile with its name trimmed.
    pub fn save_user(&self, profile: &UserProfile) -> StoreResult<()> {
        profile.validate()?;
        let profile = UserProfile {
            name: profile.name.trim().to_string(),
        };
        self.write_json(USER_KEY, &profile).inspect_err(|err| {
            warn!(
                "event=user_save module=store status=error error_code={} error={}",
                err.code(),
                err
            );
        })?;
        info!("event=user_save module=store status=ok");
        self.listeners.notify(&StoreEvent::UserChanged);
        Ok(())
    }

    /// Registers a listener called after every successful write.
    pub fn subscribe(
        &self,
        listener: impl Fn(&StoreEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.listeners.add(Arc::new(listener))
    }

    /// Returns whether a listener was removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    fn write_notes(&self, notes: &[Note], event: &str, mode: &str) -> StoreResult<()> {
        if let Err(err) = self.write_json(NOTES_KEY, notes) {
            warn!(
                "event={} module=store status=error mode={} error_code={} error={}",
                event,
                mode,
                err.code(),
                err
            );
            return Err(err);
        }
        info!(
            "event={} module=store status=ok mode={} note_count={}",
            event,
            mode,
            notes.len()
        );
        self.listeners.notify(&StoreEvent::NotesChanged {
            note_count: notes.len(),
        });
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, key: &'static str) -> StoreResult<Option<T>> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Serialization { key, source })
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value)
            .map_err(|source| StoreError::Serialization { key, source })?;
        self.kv.set(key, &raw)?;
        Ok(())
    }
}

fn unused_id(notes: &[Note]) -> NoteId {
    loop {
        let candidate = NoteId::generate();
        if notes.iter().all(|note| note.id != candidate) {
            return candidate;
        }
    }
}
