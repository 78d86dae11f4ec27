//! Checklist item model.

use crate::model::note::NoteId;
use crate::model::style::TextStyle;
use serde::{Deserialize, Serialize};

/// Row id of a checklist item.
pub type ChecklistItemId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub text: String,
    pub completed: bool,
    pub style: TextStyle,
    pub note_id: NoteId,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Insert model; new items always start uncompleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChecklistItem {
    pub note_id: NoteId,
    pub text: String,
    pub style: Option<TextStyle>,
}

/// Caller-provided changes for an existing item.
///
/// `style: None` keeps the stored style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItemPatch {
    pub text: String,
    pub completed: bool,
    pub style: Option<TextStyle>,
}

impl ChecklistItem {
    /// Applies a patch in place, leaving identity and timestamps untouched.
    pub fn apply(&mut self, patch: &ChecklistItemPatch) {
        self.text.clone_from(&patch.text);
        self.completed = patch.completed;
        if let Some(style) = patch.style {
            self.style = style;
        }
    }
}
