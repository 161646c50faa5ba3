use chrono::{DateTime, Duration, Utc};
use mynotes_core::db::open_db_in_memory;
use mynotes_core::store::NOTES_KEY;
use mynotes_core::{
    KeyValueStore, MemoryKvStore, Note, NoteDraft, NoteId, NoteStore, Priority, PriorityFilter,
    SqliteKvStore, StoreError, StoreEvent,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

fn draft(title: &str, priority: Priority) -> NoteDraft {
    NoteDraft {
        title: title.to_string(),
        content: format!("<p>{title} body</p>"),
        priority,
    }
}

#[test]
fn empty_store_save_then_load_returns_the_new_note() {
    let kv = MemoryKvStore::new();
    let store = NoteStore::new(&kv);
    assert!(store.load_all().is_empty());

    let before = Utc::now();
    let saved = store
        .save(&store.load_all(), &draft("A", Priority::Normal), None)
        .unwrap();
    let after = Utc::now();

    let loaded = store.load_all();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.len(), 1);
    let note = &loaded[0];
    assert_eq!(note.title, "A");
    assert_eq!(note.priority, Priority::Normal);
    assert!(!note.id.as_str().is_empty());
    assert!(!note.date.is_empty());

    let created_at = DateTime::parse_from_rfc3339(&note.created_at)
        .unwrap()
        .with_timezone(&Utc);
    assert!(created_at >= before - Duration::milliseconds(1));
    assert!(created_at <= after + Duration::milliseconds(1));
}

#[test]
fn create_grows_by_one_with_fresh_id() {
    let kv = MemoryKvStore::new();
    let store = NoteStore::new(&kv);

    for idx in 0..5 {
        let existing = store.load_all();
        let existing_ids = existing
            .iter()
            .map(|note| note.id.clone())
            .collect::<HashSet<_>>();

        let updated = store
            .save(&existing, &draft(&format!("n{idx}"), Priority::Important), None)
            .unwrap();

        assert_eq!(updated.len(), existing.len() + 1);
        let minted = &updated[updated.len() - 1];
        assert!(!existing_ids.contains(&minted.id));
        assert_eq!(&updated[..existing.len()], existing.as_slice());
    }
}

#[test]
fn edit_preserves_length_order_and_other_notes() {
    let kv = MemoryKvStore::new();
    let store = NoteStore::new(&kv);
    for title in ["first", "second", "third"] {
        store.save_note(&draft(title, Priority::Normal), None).unwrap();
    }
    let before = store.load_all();
    let target = before[1].clone();

    let edited = store
        .save_note(
            &NoteDraft {
                title: "second, edited".to_string(),
                content: "<b>new</b>".to_string(),
                priority: Priority::Reminder,
            },
            Some(&target.id),
        )
        .unwrap()
        .expect("edit target exists");

    let after = store.load_all();
    assert_eq!(after.len(), before.len());
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
    assert_eq!(after[1], edited);
    assert_eq!(edited.id, target.id);
    assert_eq!(edited.date, target.date);
    assert_eq!(edited.created_at, target.created_at);
    assert_eq!(edited.title, "second, edited");
    assert_eq!(edited.priority, Priority::Reminder);

    let raw_before = serde_json::to_string(&before[0]).unwrap();
    let raw_after = serde_json::to_string(&after[0]).unwrap();
    assert_eq!(raw_before, raw_after);
}

#[test]
fn removing_unknown_id_leaves_array_unchanged() {
    let kv = MemoryKvStore::new();
    let store = NoteStore::new(&kv);
    store.save_note(&draft("keep", Priority::Normal), None).unwrap();
    let before = store.load_all();

    let after = store
        .remove(&before, &NoteId::from("does-not-exist"))
        .unwrap();

    assert_eq!(after, before);
    assert_eq!(store.load_all(), before);
}

#[test]
fn save_and_delete_sequence_keeps_exactly_live_notes_with_last_values() {
    let kv = MemoryKvStore::new();
    let store = NoteStore::new(&kv);
    let mut expected: HashMap<NoteId, (String, Priority)> = HashMap::new();

    let priorities = [Priority::Important, Priority::Normal, Priority::Reminder];
    for idx in 0..9 {
        let priority = priorities[idx % 3];
        let note = store
            .save_note(&draft(&format!("note {idx}"), priority), None)
            .unwrap()
            .unwrap();
        expected.insert(note.id.clone(), (note.title.clone(), priority));
    }

    let ids = store
        .load_all()
        .into_iter()
        .map(|note| note.id)
        .collect::<Vec<_>>();
    for id in ids.iter().step_by(3) {
        store.delete_note(id).unwrap();
        expected.remove(id);
    }
    for id in ids.iter().skip(1).step_by(4) {
        if !expected.contains_key(id) {
            continue;
        }
        let edited = store
            .save_note(&draft("edited", Priority::Important), Some(id))
            .unwrap()
            .unwrap();
        expected.insert(edited.id.clone(), ("edited".to_string(), Priority::Important));
    }

    let persisted = store.load_all();
    assert_eq!(persisted.len(), expected.len());
    for note in persisted {
        let (title, priority) = expected.get(&note.id).expect("unexpected note persisted");
        assert_eq!(&note.title, title);
        assert_eq!(note.priority, *priority);
    }
}

#[test]
fn failed_write_surfaces_error_and_keeps_prior_value() {
    let kv = MemoryKvStore::new();
    let store = NoteStore::new(&kv);
    let saved = store
        .save_note(&draft("stable", Priority::Normal), None)
        .unwrap()
        .unwrap();
    let raw_before = kv.get(NOTES_KEY).unwrap();

    kv.set_fail_writes(true);
    let save_err = store
        .save_note(&draft("lost", Priority::Normal), None)
        .unwrap_err();
    let delete_err = store.delete_note(&saved.id).unwrap_err();
    kv.set_fail_writes(false);

    assert!(matches!(save_err, StoreError::Storage(_)));
    assert!(matches!(delete_err, StoreError::Storage(_)));
    assert_eq!(kv.get(NOTES_KEY).unwrap(), raw_before);
    assert_eq!(store.load_all(), vec![saved]);
}

#[test]
fn malformed_blob_loads_empty_but_blocks_writes() {
    let kv = MemoryKvStore::new();
    kv.set(NOTES_KEY, "{not json").unwrap();
    let store = NoteStore::new(&kv);

    assert!(store.load_all().is_empty());
    assert!(store.dashboard(PriorityFilter::All).is_empty());

    let err = store
        .save_note(&draft("x", Priority::Normal), None)
        .unwrap_err();
    assert_eq!(err.code(), "malformed_value");
    assert_eq!(kv.get(NOTES_KEY).unwrap().as_deref(), Some("{not json"));
}

#[test]
fn unknown_priority_makes_blob_malformed() {
    let kv = MemoryKvStore::new();
    kv.set(
        NOTES_KEY,
        r#"[{"id":"1","title":"t","content":"","priority":"Urgent","date":"","createdAt":""}]"#,
    )
    .unwrap();
    let store = NoteStore::new(&kv);

    assert!(store.load_all().is_empty());
    assert!(matches!(
        store.read_notes().unwrap_err(),
        StoreError::Serialization { key: "notes", .. }
    ));
}

#[test]
fn find_note_returns_none_for_stale_id() {
    let kv = MemoryKvStore::new();
    let store = NoteStore::new(&kv);
    let note = store
        .save_note(&draft("x", Priority::Normal), None)
        .unwrap()
        .unwrap();

    assert_eq!(store.find_note(&note.id), Some(note.clone()));
    store.delete_note(&note.id).unwrap();
    assert_eq!(store.find_note(&note.id), None);
}

#[test]
fn dashboard_lists_newest_first_with_badges() {
    let kv = MemoryKvStore::new();
    let notes = vec![
        note_at("older", Priority::Important, "2026-01-01T08:00:00.000Z"),
        note_at("newer", Priority::Important, "2026-02-01T08:00:00.000Z"),
        note_at("normal", Priority::Normal, "2026-03-01T08:00:00.000Z"),
    ];
    kv.set(NOTES_KEY, &serde_json::to_string(&notes).unwrap())
        .unwrap();
    let store = NoteStore::new(&kv);

    let view = store.dashboard(PriorityFilter::Only(Priority::Important));
    let ids = view
        .items
        .iter()
        .map(|item| item.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["newer", "older"]);
    assert_eq!(view.counts.all, 3);
    assert_eq!(view.counts.important, 2);
    assert_eq!(view.items[0].preview.as_deref(), Some("newer"));

    let all = NoteStore::<&MemoryKvStore>::sort_by_recency(&store.load_all());
    assert_eq!(all[0].id.as_str(), "normal");
    assert_eq!(
        NoteStore::<&MemoryKvStore>::count_by_priority(&all, PriorityFilter::Only(Priority::Normal)),
        NoteStore::<&MemoryKvStore>::filter_by_priority(&all, PriorityFilter::Only(Priority::Normal))
            .len()
    );
}

#[test]
fn listeners_fire_after_successful_writes_only() {
    let kv = MemoryKvStore::new();
    let store = NoteStore::new(&kv);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let subscription = store.subscribe(move |event| sink.lock().unwrap().push(*event));

    let note = store
        .save_note(&draft("a", Priority::Normal), None)
        .unwrap()
        .unwrap();
    kv.set_fail_writes(true);
    let _ = store.delete_note(&note.id);
    kv.set_fail_writes(false);
    store.delete_note(&note.id).unwrap();

    assert!(store.unsubscribe(subscription));
    store.save_note(&draft("b", Priority::Normal), None).unwrap();
    assert!(!store.unsubscribe(subscription));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            StoreEvent::NotesChanged { note_count: 1 },
            StoreEvent::NotesChanged { note_count: 0 },
        ]
    );
}

#[test]
fn listener_may_subscribe_and_unsubscribe_while_notified() {
    let store = Arc::new(NoteStore::new(MemoryKvStore::new()));
    let late_hits = Arc::new(Mutex::new(0usize));

    let handle = Arc::downgrade(&store);
    let counter = Arc::clone(&late_hits);
    let own_id = Arc::new(Mutex::new(None));
    let own_id_inner = Arc::clone(&own_id);
    let first = store.subscribe(move |_| {
        let Some(store) = handle.upgrade() else {
            return;
        };
        let counter = Arc::clone(&counter);
        store.subscribe(move |_| *counter.lock().unwrap() += 1);
        if let Some(id) = own_id_inner.lock().unwrap().take() {
            assert!(store.unsubscribe(id));
        }
    });
    *own_id.lock().unwrap() = Some(first);

    store
        .save_note(&draft("a", Priority::Normal), None)
        .unwrap()
        .unwrap();
    assert_eq!(*late_hits.lock().unwrap(), 0);

    store
        .save_note(&draft("b", Priority::Normal), None)
        .unwrap()
        .unwrap();
    assert_eq!(*late_hits.lock().unwrap(), 1);
    assert!(!store.unsubscribe(first));
}

#[test]
fn listener_may_write_back_to_the_store() {
    let store = Arc::new(NoteStore::new(MemoryKvStore::new()));
    let handle = Arc::downgrade(&store);
    store.subscribe(move |event| {
        if let (StoreEvent::NotesChanged { note_count: 1 }, Some(store)) = (event, handle.upgrade())
        {
            store
                .save_note(&draft("follow-up", Priority::Reminder), None)
                .unwrap();
        }
    });

    store
        .save_note(&draft("first", Priority::Normal), None)
        .unwrap();

    let titles = store
        .load_all()
        .into_iter()
        .map(|note| note.title)
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["first", "follow-up"]);
}

#[test]
fn editing_a_deleted_note_succeeds_without_changes() {
    let kv = MemoryKvStore::new();
    let store = NoteStore::new(&kv);
    let keep = store
        .save_note(&draft("keep", Priority::Normal), None)
        .unwrap()
        .unwrap();
    let gone = store
        .save_note(&draft("gone", Priority::Normal), None)
        .unwrap()
        .unwrap();
    store.delete_note(&gone.id).unwrap();
    let raw_before = kv.get(NOTES_KEY).unwrap();

    let saved = store
        .save_note(&draft("edited", Priority::Important), Some(&gone.id))
        .unwrap();

    assert_eq!(saved, None);
    assert_eq!(kv.get(NOTES_KEY).unwrap(), raw_before);
    assert_eq!(store.load_all(), vec![keep]);
}

#[test]
fn sqlite_backend_round_trips_field_for_field() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();
    let store = NoteStore::new(kv);

    let saved = store
        .save_note(
            &NoteDraft {
                title: "Ünïcode & \"quotes\"".to_string(),
                content: "<ul><li>one</li></ul>".to_string(),
                priority: Priority::Reminder,
            },
            None,
        )
        .unwrap()
        .unwrap();

    assert_eq!(store.load_all(), vec![saved]);
}

fn note_at(id: &str, priority: Priority, created_at: &str) -> Note {
    Note {
        id: NoteId::from(id),
        title: id.to_string(),
        content: format!("<p>{id}</p>"),
        priority,
        date: "1/1/2026".to_string(),
        created_at: created_at.to_string(),
    }
}
