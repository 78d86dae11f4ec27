//! Note model and its composed aggregate.
//!
//! # Invariants
//! - A note belongs to exactly one user (`user_id`).
//! - `NoteAggregate` always carries both child lists, possibly empty.

use crate::model::checklist::ChecklistItem;
use crate::model::style::TextStyle;
use crate::model::table::NoteTable;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// Row id of a note.
pub type NoteId = i64;

/// One note row, as returned by list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub style: TextStyle,
    pub user_id: UserId,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds.
    pub updated_at: i64,
}

/// Caller-provided note fields for create and update.
///
/// `style: None` means "default" on create and "keep current" on update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub style: Option<TextStyle>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            style: None,
        }
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = Some(style);
        self
    }
}

/// A note together with its checklist items and tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteAggregate {
    #[serde(flatten)]
    pub note: Note,
    /// Ordered by creation time ascending.
    pub checklist_items: Vec<ChecklistItem>,
    pub tables: Vec<NoteTable>,
}
