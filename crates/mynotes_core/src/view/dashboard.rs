//! Dashboard read model: sorted and filtered list plus badge counts.

use crate::model::note::{Note, NoteId, Priority, PriorityFilter};
use crate::view::list::{filter_by_priority, sort_by_recency, PriorityCounts};
use crate::view::preview::preview_text;

/// One dashboard card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSummary {
    pub id: NoteId,
    pub title: String,
    pub date: String,
    pub priority: Priority,
    /// Tag-stripped content excerpt (nullable).
    pub preview: Option<String>,
}

impl From<&Note> for NoteSummary {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            date: note.date.clone(),
            priority: note.priority,
            preview: preview_text(&note.content),
        }
    }
}

/// Everything the dashboard renders for one filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardView {
    pub filter: PriorityFilter,
    /// Newest first, restricted to `filter`.
    pub items: Vec<NoteSummary>,
    /// Counts over the unfiltered list.
    pub counts: PriorityCounts,
}

impl DashboardView {
    pub fn build(notes: &[Note], filter: PriorityFilter) -> Self {
        let sorted = sort_by_recency(notes);
        let items = filter_by_priority(&sorted, filter)
            .iter()
            .map(NoteSummary::from)
            .collect();
        Self {
            filter,
            items,
            counts: PriorityCounts::from_notes(notes),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardView;
    use crate::model::note::{Note, NoteId, Priority, PriorityFilter};

    fn note(id: &str, priority: Priority, created_at: &str, content: &str) -> Note {
        Note {
            id: NoteId::from(id),
            title: format!("title {id}"),
            content: content.to_string(),
            priority,
            date: "1/1/2026".to_string(),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn build_sorts_filters_and_counts_unfiltered() {
        let notes = vec![
            note("old", Priority::Important, "2026-01-01T00:00:00Z", "<p>a</p>"),
            note("mid", Priority::Normal, "2026-01-02T00:00:00Z", ""),
            note("new", Priority::Important, "2026-01-03T00:00:00Z", "<i>c</i>"),
        ];

        let view = DashboardView::build(&notes, PriorityFilter::Only(Priority::Important));

        let ids = view
            .items
            .iter()
            .map(|item| item.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(view.items[0].preview.as_deref(), Some("c"));
        assert_eq!(view.counts.all, 3);
        assert_eq!(view.counts.normal, 1);
    }

    #[test]
    fn empty_list_builds_empty_view() {
        let view = DashboardView::build(&[], PriorityFilter::All);
        assert!(view.is_empty());
        assert_eq!(view.counts.all, 0);
    }
}
