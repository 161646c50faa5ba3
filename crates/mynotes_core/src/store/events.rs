//! Change notification between the store and its views.

use log::warn;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Emitted after a successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    NotesChanged { note_count: usize },
    UserChanged,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: AtomicU64,
    entries: Mutex<Vec<(SubscriptionId, Listener)>>,
}

impl Listeners {
    pub(crate) fn add(&self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        match self.entries.lock() {
            Ok(mut entries) => entries.push((id, listener)),
            Err(_) => warn!("event=subscribe module=store status=error error_code=lock_poisoned"),
        }
        id
    }

    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        match self.entries.lock() {
            Ok(mut entries) => {
                let before = entries.len();
                entries.retain(|(current, _)| *current != id);
                entries.len() != before
            }
            Err(_) => false,
        }
    }

    pub(crate) fn notify(&self, event: &StoreEvent) {
        // Snapshot first: listeners may (un)subscribe or write to the store.
        let snapshot = match self.entries.lock() {
            Ok(entries) => entries
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect::<Vec<_>>(),
            Err(_) => return,
        };
        for listener in snapshot {
            listener(event);
        }
    }
}
