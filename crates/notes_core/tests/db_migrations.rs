use notes_core::db::migrations::latest_version;
use notes_core::db::{open_db, open_db_in_memory, DbError, DbPool};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in [
        "users",
        "notes",
        "checklist_items",
        "note_tables",
        "table_columns",
        "table_rows",
        "table_cells",
    ] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "note_tables");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn file_databases_use_wal_and_foreign_keys() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("wal.db")).unwrap();

    let journal_mode: String = conn
        .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
        .unwrap();
    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(journal_mode.to_ascii_lowercase(), "wal");
    assert_eq!(foreign_keys, 1);
}

#[test]
fn style_column_rejects_unknown_values() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO users (username, password_hash) VALUES ('alice', 'x');",
        [],
    )
    .unwrap();

    let result = conn.execute(
        "INSERT INTO notes (title, content, style, user_id) VALUES ('t', 'c', 'underline', 1);",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn pool_over_file_migrates_once_for_many_connections() {
    let dir = tempfile::tempdir().unwrap();
    let pool = DbPool::open(dir.path().join("pooled.db")).unwrap();

    let first = pool.get().unwrap();
    let second = pool.get().unwrap();
    assert_eq!(schema_version(&first), latest_version());
    assert_eq!(schema_version(&second), latest_version());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
