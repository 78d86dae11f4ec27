//! Table store: note-scoped tables with ordered columns and rows of cells.
//!
//! # Responsibility
//! - Create table headers and their columns inside a caller-owned transaction.
//! - Insert rows atomically, pairing cell `i` with the column at position `i`.
//! - Read fully hydrated tables for aggregate assembly.
//!
//! # Invariants
//! - Column positions equal the index in the caller-supplied name list.
//! - Row position is `MAX(position) + 1` (or 0), computed inside the insert.
//! - `add_row` runs in its own `IMMEDIATE` transaction; a cell-count mismatch
//!   or any failed insert leaves no row behind.
//! - No ownership filtering happens here.

use crate::model::note::NoteId;
use crate::model::table::{
    ColumnId, NoteTable, RowId, TableCell, TableColumn, TableHeader, TableId, TableRow,
};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::collections::HashMap;

/// Scoped write handle for multi-statement table creation.
///
/// Dropping the handle without calling [`TableTransaction::commit`] rolls back
/// every statement issued through it.
pub trait TableTransaction {
    /// Inserts the table header; returns it with id and `created_at`.
    fn create_table(&self, note_id: NoteId, title: &str) -> RepoResult<NoteTable>;
    /// Inserts one column per name with `position = index`.
    fn create_columns(&self, table_id: TableId, names: &[String]) -> RepoResult<Vec<TableColumn>>;
    fn commit(self) -> RepoResult<()>;
}

/// Repository interface for note tables.
pub trait TableRepository {
    type Tx<'a>: TableTransaction
    where
        Self: 'a;

    /// Starts a write transaction for table creation.
    fn begin_transaction(&self) -> RepoResult<Self::Tx<'_>>;
    /// Loads one table header, used to resolve the owning note.
    fn get_table(&self, id: TableId) -> RepoResult<Option<TableHeader>>;
    /// Appends one row; owns its transaction.
    fn add_row(&self, table_id: TableId, cells: &[String]) -> RepoResult<TableRow>;
    /// Loads every table of a note with columns, rows and cells.
    fn get_tables_by_note(&self, note_id: NoteId) -> RepoResult<Vec<NoteTable>>;
}

/// SQLite-backed table store.
pub struct SqliteTableRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTableRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

/// SQLite transaction handle returned by [`SqliteTableRepository::begin_transaction`].
pub struct SqliteTableTransaction<'conn> {
    tx: Transaction<'conn>,
}

impl TableTransaction for SqliteTableTransaction<'_> {
    fn create_table(&self, note_id: NoteId, title: &str) -> RepoResult<NoteTable> {
        let header = self.tx.query_row(
            "INSERT INTO note_tables (note_id, title)
             VALUES (?1, ?2)
             RETURNING id, note_id, title, created_at;",
            params![note_id, title],
            parse_header_row,
        )?;
        Ok(header.into_table())
    }

    fn create_columns(&self, table_id: TableId, names: &[String]) -> RepoResult<Vec<TableColumn>> {
        let mut stmt = self.tx.prepare_cached(
            "INSERT INTO table_columns (table_id, name, position)
             VALUES (?1, ?2, ?3)
             RETURNING id;",
        )?;

        let mut columns = Vec::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            let position = to_position(index)?;
            let id: ColumnId =
                stmt.query_row(params![table_id, name.as_str(), position], |row| row.get(0))?;
            columns.push(TableColumn {
                id,
                table_id,
                name: name.clone(),
                position,
            });
        }

        Ok(columns)
    }

    fn commit(self) -> RepoResult<()> {
        self.tx.commit()?;
        Ok(())
    }
}

impl TableRepository for SqliteTableRepository<'_> {
    type Tx<'a>
        = SqliteTableTransaction<'a>
    where
        Self: 'a;

    fn begin_transaction(&self) -> RepoResult<Self::Tx<'_>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        Ok(SqliteTableTransaction { tx })
    }

    fn get_table(&self, id: TableId) -> RepoResult<Option<TableHeader>> {
        let header = self
            .conn
            .query_row(
                "SELECT id, note_id, title, created_at FROM note_tables WHERE id = ?1;",
                [id],
                parse_header_row,
            )
            .optional()?;
        Ok(header)
    }

    fn add_row(&self, table_id: TableId, cells: &[String]) -> RepoResult<TableRow> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let column_ids = load_column_ids(&tx, table_id)?;
        if cells.len() != column_ids.len() {
            return Err(RepoError::CellCountMismatch {
                expected: column_ids.len(),
                actual: cells.len(),
            });
        }

        let (row_id, position): (RowId, i64) = tx.query_row(
            "INSERT INTO table_rows (table_id, position)
             VALUES (
                ?1,
                (SELECT COALESCE(MAX(position), -1) + 1 FROM table_rows WHERE table_id = ?1)
             )
             RETURNING id, position;",
            [table_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let mut stored_cells = Vec::with_capacity(cells.len());
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO table_cells (row_id, column_id, content)
                 VALUES (?1, ?2, ?3)
                 RETURNING id;",
            )?;
            for (content, column_id) in cells.iter().zip(column_ids) {
                let id = stmt.query_row(params![row_id, column_id, content.as_str()], |row| {
                    row.get(0)
                })?;
                stored_cells.push(TableCell {
                    id,
                    row_id,
                    column_id,
                    content: content.clone(),
                });
            }
        }

        tx.commit()?;
        Ok(TableRow {
            id: row_id,
            table_id,
            position,
            cells: stored_cells,
        })
    }

    fn get_tables_by_note(&self, note_id: NoteId) -> RepoResult<Vec<NoteTable>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, note_id, title, created_at
             FROM note_tables
             WHERE note_id = ?1
             ORDER BY id ASC;",
        )?;
        let headers = stmt
            .query_map([note_id], parse_header_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut tables = Vec::with_capacity(headers.len());
        for header in headers {
            let mut table = header.into_table();
            table.columns = load_columns(self.conn, table.id)?;
            table.rows = load_rows(self.conn, table.id)?;
            tables.push(table);
        }

        Ok(tables)
    }
}

fn load_column_ids(conn: &Connection, table_id: TableId) -> RepoResult<Vec<ColumnId>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id FROM table_columns WHERE table_id = ?1 ORDER BY position ASC;",
    )?;
    let ids = stmt
        .query_map([table_id], |row| row.get(0))?
        .collect::<Result<Vec<ColumnId>, _>>()?;
    Ok(ids)
}

fn load_columns(conn: &Connection, table_id: TableId) -> RepoResult<Vec<TableColumn>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, table_id, name, position
         FROM table_columns
         WHERE table_id = ?1
         ORDER BY position ASC;",
    )?;
    let columns = stmt
        .query_map([table_id], |row| {
            Ok(TableColumn {
                id: row.get("id")?,
                table_id: row.get("table_id")?,
                name: row.get("name")?,
                position: row.get("position")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}

fn load_rows(conn: &Connection, table_id: TableId) -> RepoResult<Vec<TableRow>> {
    let mut row_stmt = conn.prepare_cached(
        "SELECT id, position
         FROM table_rows
         WHERE table_id = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = row_stmt
        .query_map([table_id], |row| {
            Ok(TableRow {
                id: row.get("id")?,
                table_id,
                position: row.get("position")?,
                cells: Vec::new(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let index_by_id: HashMap<RowId, usize> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| (row.id, index))
        .collect();

    // One pass over every cell of the table, already in row/column order.
    let mut cell_stmt = conn.prepare_cached(
        "SELECT c.id AS id, c.row_id AS row_id, c.column_id AS column_id, c.content AS content
         FROM table_cells c
         INNER JOIN table_rows r ON r.id = c.row_id
         INNER JOIN table_columns col ON col.id = c.column_id
         WHERE r.table_id = ?1
         ORDER BY r.position ASC, col.position ASC;",
    )?;
    let mut cells = cell_stmt.query([table_id])?;
    while let Some(cell_row) = cells.next()? {
        let cell = TableCell {
            id: cell_row.get("id")?,
            row_id: cell_row.get("row_id")?,
            column_id: cell_row.get("column_id")?,
            content: cell_row.get("content")?,
        };
        let index = index_by_id.get(&cell.row_id).copied().ok_or_else(|| {
            RepoError::InvalidData(format!(
                "table_cells.row_id {} does not belong to table {table_id}",
                cell.row_id
            ))
        })?;
        rows[index].cells.push(cell);
    }

    Ok(rows)
}

fn parse_header_row(row: &Row<'_>) -> rusqlite::Result<TableHeader> {
    Ok(TableHeader {
        id: row.get("id")?,
        note_id: row.get("note_id")?,
        title: row.get("title")?,
        created_at: row.get("created_at")?,
    })
}

fn to_position(index: usize) -> RepoResult<i64> {
    i64::try_from(index)
        .map_err(|_| RepoError::InvalidData(format!("column index {index} overflows i64")))
}
