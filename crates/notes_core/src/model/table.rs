//! Note table model: ordered columns and ordered rows of cells.
//!
//! # Invariants
//! - Column positions are `0..n` in caller-supplied order.
//! - Row positions are strictly increasing per table, starting at 0.
//! - `row.cells[i].column_id == table.columns[i].id` for every stored row.

use crate::model::note::NoteId;
use serde::{Deserialize, Serialize};

pub type TableId = i64;
pub type ColumnId = i64;
pub type RowId = i64;
pub type CellId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteTable {
    pub id: TableId,
    pub note_id: NoteId,
    pub title: String,
    pub created_at: i64,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    pub id: ColumnId,
    #[serde(skip)]
    pub table_id: TableId,
    pub name: String,
    pub position: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: RowId,
    #[serde(skip)]
    pub table_id: TableId,
    pub position: i64,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    pub id: CellId,
    #[serde(skip)]
    pub row_id: RowId,
    pub column_id: ColumnId,
    pub content: String,
}

/// Table header without nested columns/rows; enough to resolve ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeader {
    pub id: TableId,
    pub note_id: NoteId,
    pub title: String,
    pub created_at: i64,
}

impl TableHeader {
    /// Expands the header into an empty table.
    pub fn into_table(self) -> NoteTable {
        NoteTable {
            id: self.id,
            note_id: self.note_id,
            title: self.title,
            created_at: self.created_at,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}
