use notes_core::model::user::{NewUser, UserId};
use notes_core::repo::checklist_repo::SqliteChecklistRepository;
use notes_core::repo::note_repo::{NoteRepository, SqliteNoteRepository};
use notes_core::repo::user_repo::{SqliteUserRepository, UserRepository};
use notes_core::service::checklist_service::ChecklistService;
use notes_core::{
    open_db_in_memory, ChecklistItemPatch, Entity, NoteDraft, NoteId, ServiceError, TextStyle,
};
use rusqlite::Connection;

fn seed_user(conn: &Connection, username: &str) -> UserId {
    SqliteUserRepository::new(conn)
        .create_user(&NewUser {
            username: username.to_string(),
            password_hash: "x".to_string(),
        })
        .unwrap()
        .id
}

fn seed_note(conn: &Connection, owner: UserId) -> NoteId {
    SqliteNoteRepository::new(conn)
        .create_note(owner, &NoteDraft::new("list", ""))
        .unwrap()
        .id
}

fn service(
    conn: &Connection,
) -> ChecklistService<SqliteNoteRepository<'_>, SqliteChecklistRepository<'_>> {
    ChecklistService::new(
        SqliteNoteRepository::new(conn),
        SqliteChecklistRepository::new(conn),
    )
}

#[test]
fn new_items_start_uncompleted_with_default_style() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let note = seed_note(&conn, alice);

    let item = service(&conn)
        .create_item(note, "buy milk", None, alice)
        .unwrap();
    assert!(item.id > 0);
    assert_eq!(item.text, "buy milk");
    assert!(!item.completed);
    assert_eq!(item.style, TextStyle::Normal);
    assert_eq!(item.note_id, note);
}

#[test]
fn items_are_listed_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let note = seed_note(&conn, alice);
    let service = service(&conn);

    let texts = ["first", "second", "third"];
    for text in texts {
        service.create_item(note, text, None, alice).unwrap();
    }

    let listed: Vec<_> = service
        .list_items(note, alice)
        .unwrap()
        .into_iter()
        .map(|item| item.text)
        .collect();
    assert_eq!(listed, texts);
}

#[test]
fn update_applies_patch_and_keeps_style_when_unset() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let note = seed_note(&conn, alice);
    let service = service(&conn);
    let item = service
        .create_item(note, "draft", Some(TextStyle::Bold), alice)
        .unwrap();

    let updated = service
        .update_item(
            item.id,
            &ChecklistItemPatch {
                text: "done it".to_string(),
                completed: true,
                style: None,
            },
            alice,
        )
        .unwrap();
    assert_eq!(updated.id, item.id);
    assert_eq!(updated.text, "done it");
    assert!(updated.completed);
    assert_eq!(updated.style, TextStyle::Bold);
    assert_eq!(updated.created_at, item.created_at);
}

#[test]
fn foreign_items_are_reported_as_missing_items() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let bob = seed_user(&conn, "bob");
    let note = seed_note(&conn, alice);
    let service = service(&conn);
    let item = service.create_item(note, "secret", None, alice).unwrap();

    let patch = ChecklistItemPatch {
        text: "pwned".to_string(),
        completed: true,
        style: None,
    };
    let err = service.update_item(item.id, &patch, bob).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(Entity::ChecklistItem(id)) if id == item.id));

    let err = service.delete_item(item.id, bob).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(Entity::ChecklistItem(id)) if id == item.id));

    let err = service.create_item(note, "sneaky", None, bob).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(Entity::Note(id)) if id == note));

    let err = service.list_items(note, bob).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(Entity::Note(_))));

    let items = service.list_items(note, alice).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].text, "secret");
}

#[test]
fn delete_removes_item_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let note = seed_note(&conn, alice);
    let service = service(&conn);
    let item = service.create_item(note, "once", None, alice).unwrap();

    service.delete_item(item.id, alice).unwrap();
    assert!(service.list_items(note, alice).unwrap().is_empty());
    assert!(matches!(
        service.delete_item(item.id, alice).unwrap_err(),
        ServiceError::NotFound(Entity::ChecklistItem(_))
    ));
}

#[test]
fn missing_item_update_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let patch = ChecklistItemPatch {
        text: "nothing".to_string(),
        completed: false,
        style: None,
    };

    let err = service(&conn).update_item(999, &patch, alice).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(Entity::ChecklistItem(999))));
}
