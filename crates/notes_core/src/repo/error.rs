//! Repository error type shared by every store.

use crate::db::DbError;
use crate::model::checklist::ChecklistItemId;
use crate::model::note::NoteId;
use crate::model::table::TableId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity reference carried by not-found errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    User(String),
    Note(NoteId),
    ChecklistItem(ChecklistItemId),
    Table(TableId),
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User(name) => write!(f, "user `{name}`"),
            Self::Note(id) => write!(f, "note {id}"),
            Self::ChecklistItem(id) => write!(f, "checklist item {id}"),
            Self::Table(id) => write!(f, "table {id}"),
        }
    }
}

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// No row matched; for note queries this also covers "not owned".
    NotFound(Entity),
    /// A unique constraint rejected the write.
    Duplicate(String),
    /// Row insert was given a different number of cells than the table has columns.
    CellCountMismatch { expected: usize, actual: usize },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(entity) => write!(f, "{entity} not found"),
            Self::Duplicate(what) => write!(f, "duplicate value: {what}"),
            Self::CellCountMismatch { expected, actual } => write!(
                f,
                "cell count ({actual}) does not match column count ({expected})"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Duplicate(_) => None,
            Self::CellCountMismatch { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
