//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for every entity kind.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Note queries are always scoped by owning user.
//! - Checklist and table stores do no ownership checks; the service layer runs
//!   the ownership guard before calling them.
//! - Repository APIs return semantic errors (`NotFound`, `Duplicate`,
//!   `CellCountMismatch`) in addition to DB transport errors.

pub mod checklist_repo;
mod error;
pub mod note_repo;
pub mod table_repo;
pub mod user_repo;

pub use error::{Entity, RepoError, RepoResult};

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn parse_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

pub(crate) fn parse_style(
    value: &str,
    column: &str,
) -> RepoResult<crate::model::style::TextStyle> {
    crate::model::style::TextStyle::from_db(value).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid style `{value}` in {column}"))
    })
}
