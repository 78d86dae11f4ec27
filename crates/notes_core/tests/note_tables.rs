use notes_core::model::user::{NewUser, UserId};
use notes_core::repo::note_repo::{NoteRepository, SqliteNoteRepository};
use notes_core::repo::table_repo::{SqliteTableRepository, TableRepository, TableTransaction};
use notes_core::repo::user_repo::{SqliteUserRepository, UserRepository};
use notes_core::service::table_service::TableService;
use notes_core::{
    open_db_in_memory, Entity, NoteDraft, NoteId, RepoError, ServiceError, TableId,
    ValidationError,
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
        .create_note(owner, &NoteDraft::new("tables", ""))
        .unwrap()
        .id
}

fn service(conn: &Connection) -> TableService<SqliteNoteRepository<'_>, SqliteTableRepository<'_>> {
    TableService::new(
        SqliteNoteRepository::new(conn),
        SqliteTableRepository::new(conn),
    )
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn row_count(conn: &Connection, table_id: TableId) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM table_rows WHERE table_id = ?1;",
        [table_id],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn create_table_assigns_column_positions_in_order() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let note = seed_note(&conn, alice);

    let table = service(&conn)
        .create_table(note, "Todo", &strings(&["Task", "Status", "Due"]), alice)
        .unwrap();
    assert!(table.id > 0);
    assert_eq!(table.note_id, note);
    assert!(table.rows.is_empty());

    let layout: Vec<_> = table
        .columns
        .iter()
        .map(|column| (column.name.as_str(), column.position))
        .collect();
    assert_eq!(layout, vec![("Task", 0), ("Status", 1), ("Due", 2)]);
}

#[test]
fn rows_pair_cells_with_columns_by_position() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let note = seed_note(&conn, alice);
    let service = service(&conn);
    let table = service
        .create_table(note, "Todo", &strings(&["Task", "Status"]), alice)
        .unwrap();

    let row = service
        .add_row(table.id, &strings(&["Buy milk", "open"]), alice)
        .unwrap();
    assert_eq!(row.position, 0);
    assert_eq!(row.cells.len(), table.columns.len());
    for (cell, column) in row.cells.iter().zip(&table.columns) {
        assert_eq!(cell.column_id, column.id);
    }
    assert_eq!(row.cells[0].content, "Buy milk");
    assert_eq!(row.cells[1].content, "open");

    let stored = service.list_tables(note, alice).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].columns, table.columns);
    assert_eq!(stored[0].rows, vec![row]);
}

#[test]
fn cell_count_mismatch_is_rejected_without_side_effects() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let note = seed_note(&conn, alice);
    let service = service(&conn);
    let table = service
        .create_table(note, "Todo", &strings(&["Task", "Status"]), alice)
        .unwrap();

    let err = service
        .add_row(table.id, &strings(&["only one"]), alice)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::CellCountMismatch {
            expected: 2,
            actual: 1
        })
    ));
    assert_eq!(row_count(&conn, table.id), 0);

    let err = service
        .add_row(table.id, &strings(&["a", "b", "c"]), alice)
        .unwrap_err();
    assert_eq!(err.kind(), "validation_failed");
    assert_eq!(row_count(&conn, table.id), 0);

    // The failed attempts must not consume row positions.
    let row = service.add_row(table.id, &strings(&["a", "b"]), alice).unwrap();
    assert_eq!(row.position, 0);
}

#[test]
fn row_positions_are_dense_per_table_when_interleaved() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let note = seed_note(&conn, alice);
    let service = service(&conn);
    let left = service
        .create_table(note, "Left", &strings(&["x"]), alice)
        .unwrap();
    let right = service
        .create_table(note, "Right", &strings(&["y"]), alice)
        .unwrap();

    let mut left_positions = Vec::new();
    let mut right_positions = Vec::new();
    for index in 0..4 {
        let value = index.to_string();
        left_positions.push(
            service
                .add_row(left.id, &[value.clone()], alice)
                .unwrap()
                .position,
        );
        right_positions.push(service.add_row(right.id, &[value], alice).unwrap().position);
    }

    assert_eq!(left_positions, vec![0, 1, 2, 3]);
    assert_eq!(right_positions, vec![0, 1, 2, 3]);
}

#[test]
fn empty_column_list_fails_validation_and_creates_nothing() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let note = seed_note(&conn, alice);

    let err = service(&conn)
        .create_table(note, "Empty", &[], alice)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::EmptyColumns)
    ));
    let tables: i64 = conn
        .query_row("SELECT COUNT(*) FROM note_tables;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(tables, 0);
}

#[test]
fn dropped_table_transaction_rolls_back_header_and_columns() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let note = seed_note(&conn, alice);
    let repo = SqliteTableRepository::new(&conn);

    {
        let tx = repo.begin_transaction().unwrap();
        let table = tx.create_table(note, "Half").unwrap();
        tx.create_columns(table.id, &strings(&["a", "b"])).unwrap();
    }

    assert!(repo.get_tables_by_note(note).unwrap().is_empty());
    let columns: i64 = conn
        .query_row("SELECT COUNT(*) FROM table_columns;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(columns, 0);
}

#[test]
fn duplicate_column_names_keep_order_and_distinct_positions() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let note = seed_note(&conn, alice);
    let service = service(&conn);

    let table = service
        .create_table(note, "Dupes", &strings(&["A", "A", "B"]), alice)
        .unwrap();
    let layout: Vec<_> = table
        .columns
        .iter()
        .map(|column| (column.name.as_str(), column.position))
        .collect();
    assert_eq!(layout, vec![("A", 0), ("A", 1), ("B", 2)]);

    service
        .add_row(table.id, &strings(&["first", "second", "third"]), alice)
        .unwrap();
    let stored = service.list_tables(note, alice).unwrap();
    assert_eq!(stored[0].columns, table.columns);
    let contents: Vec<_> = stored[0].rows[0]
        .cells
        .iter()
        .map(|cell| (cell.column_id, cell.content.as_str()))
        .collect();
    assert_eq!(
        contents,
        vec![
            (table.columns[0].id, "first"),
            (table.columns[1].id, "second"),
            (table.columns[2].id, "third"),
        ]
    );
}

#[test]
fn failed_column_insert_leaves_no_table_header() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let note = seed_note(&conn, alice);
    let repo = SqliteTableRepository::new(&conn);

    {
        let tx = repo.begin_transaction().unwrap();
        tx.create_table(note, "Orphan").unwrap();
        // No table 9999 exists, so the foreign key rejects the column.
        assert!(tx.create_columns(9_999, &strings(&["a"])).is_err());
    }

    assert!(conn.is_autocommit());
    assert!(repo.get_tables_by_note(note).unwrap().is_empty());
    for child in ["note_tables", "table_columns"] {
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {child};"), [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 0, "{child} should be empty after rollback");
    }
}

#[test]
fn repository_add_row_reports_raw_mismatch() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let note = seed_note(&conn, alice);
    let repo = SqliteTableRepository::new(&conn);
    let tx = repo.begin_transaction().unwrap();
    let table = tx.create_table(note, "Raw").unwrap();
    tx.create_columns(table.id, &strings(&["a"])).unwrap();
    tx.commit().unwrap();

    let err = repo.add_row(table.id, &[]).unwrap_err();
    assert!(matches!(
        err,
        RepoError::CellCountMismatch {
            expected: 1,
            actual: 0
        }
    ));
    assert!(conn.is_autocommit());
}

#[test]
fn foreign_tables_are_hidden_from_other_users() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let bob = seed_user(&conn, "bob");
    let note = seed_note(&conn, alice);
    let service = service(&conn);
    let table = service
        .create_table(note, "Mine", &strings(&["a"]), alice)
        .unwrap();

    let err = service
        .add_row(table.id, &strings(&["intrusion"]), bob)
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(Entity::Table(id)) if id == table.id));
    assert_eq!(row_count(&conn, table.id), 0);

    let err = service
        .create_table(note, "Theirs", &strings(&["b"]), bob)
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(Entity::Note(id)) if id == note));

    assert!(matches!(
        service.list_tables(note, bob).unwrap_err(),
        ServiceError::NotFound(Entity::Note(_))
    ));
    assert!(matches!(
        service.add_row(9_999, &strings(&["x"]), alice).unwrap_err(),
        ServiceError::NotFound(Entity::Table(9_999))
    ));
}

#[test]
fn deleting_note_cascades_to_tables_rows_and_cells() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let note = seed_note(&conn, alice);
    let service = service(&conn);
    let table = service
        .create_table(note, "Doomed", &strings(&["a", "b"]), alice)
        .unwrap();
    service
        .add_row(table.id, &strings(&["1", "2"]), alice)
        .unwrap();

    SqliteNoteRepository::new(&conn)
        .delete_note(note, alice)
        .unwrap();

    for child in ["note_tables", "table_columns", "table_rows", "table_cells"] {
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {child};"), [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 0, "{child} should be empty after cascade");
    }
    assert!(matches!(
        service.add_row(table.id, &strings(&["1", "2"]), alice).unwrap_err(),
        ServiceError::NotFound(Entity::Table(_))
    ));
}
