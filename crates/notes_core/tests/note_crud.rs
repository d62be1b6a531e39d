use notes_core::{Note, NoteService, Privacy, ServiceError, SortOrder};

const CREATED_AT: i64 = 1_700_000_000_000;

fn fixed_clock() -> i64 {
    CREATED_AT
}

fn service() -> NoteService {
    NoteService::with_clock(fixed_clock)
}

#[test]
fn add_returns_increasing_ids_starting_at_one() {
    let mut service = service();
    assert_eq!(service.add("Test 1", "Body 1", 1), 1);
    assert_eq!(service.add("Test 2", "Body 2", 2), 2);
    assert_eq!(service.add("Test 3", "Body 3", 1), 3);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let mut service = service();
    service.add("a", "a", 1);
    let second = service.add("b", "b", 1);
    service.delete(second).unwrap();

    assert_eq!(service.add("c", "c", 1), 3);
}

#[test]
fn get_by_id_returns_constructed_fields() {
    let mut service = service();
    service.add("Test 1", "Body 1", 1);

    let note = service.get_by_id(1).unwrap();
    assert_eq!(*note, Note::new(1, 1, "Test 1", "Body 1", CREATED_AT));
    assert_eq!(note.privacy, Privacy::Public);
    assert!(!note.is_deleted);
    assert!(note.comments.is_empty());
}

#[test]
fn get_by_id_rejects_unknown_id() {
    let mut service = service();
    service.add("Test 1", "Body 1", 1);

    let err = service.get_by_id(3).unwrap_err();
    assert_eq!(err, ServiceError::NoteNotFound(3));
}

#[test]
fn list_by_owner_oldest_first() {
    let mut service = service();
    service.add("Test 1", "Body 1", 1);
    service.add("Other", "Other", 2);
    service.add("Test 3", "Body 3", 1);

    let listed = service.list_by_owner(1, Some(SortOrder::OldestFirst));
    assert_eq!(
        listed,
        vec![
            Note::new(1, 1, "Test 1", "Body 1", CREATED_AT),
            Note::new(3, 1, "Test 3", "Body 3", CREATED_AT),
        ]
    );
}

#[test]
fn list_by_owner_newest_first_is_the_default() {
    let mut service = service();
    service.add("Test 1", "Body 1", 1);
    service.add("Test 3", "Body 3", 1);

    let explicit = service.list_by_owner(1, Some(SortOrder::from_flag(0)));
    let defaulted = service.list_by_owner(1, None);

    let ids: Vec<_> = explicit.iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(explicit, defaulted);
}

#[test]
fn list_by_owner_is_empty_for_unknown_owner() {
    let mut service = service();
    service.add("Test 1", "Body 1", 1);
    assert!(service.list_by_owner(42, None).is_empty());
}

#[test]
fn edit_replaces_title_and_text() {
    let mut service = service();
    service.add("Test 1", "Body 1", 1);
    service.add("Test 3", "Body 3", 1);

    service.edit(1, "Heading", "English body").unwrap();

    let note = service.get_by_id(1).unwrap();
    assert_eq!(note.title, "Heading");
    assert_eq!(note.text, "English body");
    assert_eq!(service.get_by_id(2).unwrap().title, "Test 3");
}

#[test]
fn edit_rejects_unknown_id() {
    let mut service = service();
    service.add("Test 1", "Body 1", 1);
    service.add("Test 3", "Body 3", 1);

    let err = service.edit(3, "Heading", "English body").unwrap_err();
    assert_eq!(err, ServiceError::NoteNotFound(3));
}

#[test]
fn delete_moves_note_to_archive() {
    let mut service = service();
    service.add("Test 1", "Body 1", 1);
    service.add("Test 3", "Body 3", 1);
    service.create_comment(1, 2, "kept with note").unwrap();

    service.delete(1).unwrap();

    assert_eq!(service.get_by_id(1).unwrap_err(), ServiceError::NoteNotFound(1));
    let ids: Vec<_> = service.list_by_owner(1, None).iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![2]);

    let snapshot = service.dump();
    assert_eq!(snapshot.notes.len(), 1);
    assert_eq!(snapshot.archive.len(), 1);
    let archived = &snapshot.archive[0];
    assert_eq!(archived.id, 1);
    assert!(archived.is_deleted);
    assert_eq!(archived.comments.len(), 1);
    assert_eq!(archived.comments[0].message, "kept with note");
}

#[test]
fn delete_rejects_unknown_or_archived_id() {
    let mut service = service();
    service.add("Test 1", "Body 1", 1);
    service.add("Test 3", "Body 3", 1);

    assert_eq!(service.delete(3).unwrap_err(), ServiceError::NoteNotFound(3));

    service.delete(1).unwrap();
    assert_eq!(service.delete(1).unwrap_err(), ServiceError::NoteNotFound(1));
    assert_eq!(
        service.edit(1, "x", "y").unwrap_err(),
        ServiceError::NoteNotFound(1)
    );
}

#[test]
fn reset_clears_state_and_counters() {
    let mut service = service();
    service.add("Test 1", "Body 1", 1);
    service.create_comment(1, 1, "hi").unwrap();
    service.delete(1).unwrap();

    service.reset();

    let snapshot = service.dump();
    assert!(snapshot.notes.is_empty());
    assert!(snapshot.archive.is_empty());
    assert_eq!(service.add("again", "again", 1), 1);
    assert_eq!(service.create_comment(1, 1, "again").unwrap(), 1);
}
