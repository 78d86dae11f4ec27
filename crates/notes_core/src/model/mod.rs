//! Domain model for users, notes and their nested checklist/table content.
//!
//! # Responsibility
//! - Define canonical data structures used by stores and services.
//! - Keep input validation rules next to the types they guard.
//!
//! # Invariants
//! - Every persisted object is identified by a positive SQLite row id.
//! - Ownership flows `cell/row/column -> table -> note -> user` and
//!   `checklist item -> note -> user`.

pub mod checklist;
pub mod note;
pub mod style;
pub mod table;
pub mod user;
pub mod validation;
