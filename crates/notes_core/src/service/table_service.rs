//! Note table use-case service.
//!
//! # Responsibility
//! - Create a table and its columns as one transaction.
//! - Guard row insertion by resolving `table -> note -> user`.
//!
//! # Invariants
//! - Ownership is checked before validation, so callers without access learn
//!   nothing about the target.
//! - A failed table creation leaves neither header nor columns behind.

use crate::model::note::NoteId;
use crate::model::table::{NoteTable, TableId, TableRow};
use crate::model::user::UserId;
use crate::model::validation::ValidationError;
use crate::repo::note_repo::NoteRepository;
use crate::repo::table_repo::{TableRepository, TableTransaction};
use crate::repo::Entity;
use crate::service::ownership::verify_note_ownership;
use crate::service::{ServiceError, ServiceResult};

pub struct TableService<N, T> {
    notes: N,
    tables: T,
}

impl<N, T> TableService<N, T>
where
    N: NoteRepository,
    T: TableRepository,
{
    pub fn new(notes: N, tables: T) -> Self {
        Self { notes, tables }
    }

    /// Creates a table with `columns` (kept in the given order) on an owned note.
    pub fn create_table(
        &self,
        note_id: NoteId,
        title: &str,
        columns: &[String],
        user_id: UserId,
    ) -> ServiceResult<NoteTable> {
        verify_note_ownership(&self.notes, note_id, user_id)?;
        if columns.is_empty() {
            return Err(ValidationError::EmptyColumns.into());
        }

        let tx = self.tables.begin_transaction()?;
        let mut table = tx.create_table(note_id, title)?;
        table.columns = tx.create_columns(table.id, columns)?;
        tx.commit()?;

        Ok(table)
    }

    /// Appends a row to a table on an owned note.
    ///
    /// # Errors
    /// - `NotFound(Table)` for a missing or foreign table.
    /// - `Validation(CellCountMismatch)` when `cells` and columns differ in length.
    pub fn add_row(
        &self,
        table_id: TableId,
        cells: &[String],
        user_id: UserId,
    ) -> ServiceResult<TableRow> {
        let header = self
            .tables
            .get_table(table_id)?
            .ok_or(ServiceError::NotFound(Entity::Table(table_id)))?;
        verify_note_ownership(&self.notes, header.note_id, user_id)
            .map_err(|err| err.conceal_as(Entity::Table(table_id)))?;

        Ok(self.tables.add_row(table_id, cells)?)
    }

    /// Lists hydrated tables of an owned note.
    pub fn list_tables(&self, note_id: NoteId, user_id: UserId) -> ServiceResult<Vec<NoteTable>> {
        verify_note_ownership(&self.notes, note_id, user_id)?;
        Ok(self.tables.get_tables_by_note(note_id)?)
    }
}
