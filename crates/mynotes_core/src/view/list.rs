//! Recency ordering and priority selection over note lists.
//!
//! # Invariants
//! - Sorting is stable: equal `created_at` keeps input order.
//! - Notes without a parsable `created_at` sort after all dated notes.
//! - Filter and count apply the same selection rule.

use crate::model::note::{Note, Priority, PriorityFilter};

/// Orders notes newest first by `created_at`.
pub fn sort_by_recency(notes: &[Note]) -> Vec<Note> {
    let mut keyed = notes
        .iter()
        .map(|note| (note.created_at_instant(), note))
        .collect::<Vec<_>>();
    // `None < Some(_)`, so the reversed comparison puts undated notes last.
    keyed.sort_by(|(left, _), (right, _)| right.cmp(left));
    keyed.into_iter().map(|(_, note)| note.clone()).collect()
}

/// Returns the notes selected by `filter`, in input order.
pub fn filter_by_priority(notes: &[Note], filter: PriorityFilter) -> Vec<Note> {
    notes
        .iter()
        .filter(|note| filter.matches(note.priority))
        .cloned()
        .collect()
}

/// Counts the notes selected by `filter`.
pub fn count_by_priority(notes: &[Note], filter: PriorityFilter) -> usize {
    notes
        .iter()
        .filter(|note| filter.matches(note.priority))
        .count()
}

/// Badge counts for every filter button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    pub all: usize,
    pub important: usize,
    pub normal: usize,
    pub reminder: usize,
}

impl PriorityCounts {
    pub fn from_notes(notes: &[Note]) -> Self {
        Self {
            all: count_by_priority(notes, PriorityFilter::All),
            important: count_by_priority(notes, PriorityFilter::Only(Priority::Important)),
            normal: count_by_priority(notes, PriorityFilter::Only(Priority::Normal)),
            reminder: count_by_priority(notes, PriorityFilter::Only(Priority::Reminder)),
        }
    }

    pub fn get(&self, filter: PriorityFilter) -> usize {
        match filter {
            PriorityFilter::All => self.all,
            PriorityFilter::Only(Priority::Important) => self.important,
            PriorityFilter::Only(Priority::Normal) => self.normal,
            PriorityFilter::Only(Priority::Reminder) => self.reminder,
        }
    }
}
