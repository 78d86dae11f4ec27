//! Note use-case service.
//!
//! # Responsibility
//! - Provide user-scoped create/get/list/update/delete for notes.
//! - Return the full aggregate on single-note fetch.
//!
//! # Invariants
//! - Every call carries the acting user id; the store filters on it.
//! - `list_notes` is summary-only, `get_note` is the aggregate.

use crate::model::note::{Note, NoteAggregate, NoteDraft, NoteId};
use crate::model::user::UserId;
use crate::repo::checklist_repo::ChecklistRepository;
use crate::repo::note_repo::NoteRepository;
use crate::repo::table_repo::TableRepository;
use crate::repo::Entity;
use crate::service::aggregate::assemble_note;
use crate::service::{ServiceError, ServiceResult};

/// Note service facade over note, checklist and table stores.
pub struct NoteService<N, C, T> {
    notes: N,
    items: C,
    tables: T,
}

impl<N, C, T> NoteService<N, C, T>
where
    N: NoteRepository,
    C: ChecklistRepository,
    T: TableRepository,
{
    pub fn new(notes: N, items: C, tables: T) -> Self {
        Self {
            notes,
            items,
            tables,
        }
    }

    /// Creates a note owned by `user_id`; style defaults to `normal`.
    pub fn create_note(&self, user_id: UserId, draft: &NoteDraft) -> ServiceResult<Note> {
        Ok(self.notes.create_note(user_id, draft)?)
    }

    /// Gets one owned note with its checklist items and tables.
    pub fn get_note(&self, id: NoteId, user_id: UserId) -> ServiceResult<NoteAggregate> {
        let note = self
            .notes
            .get_note(id, user_id)?
            .ok_or(ServiceError::NotFound(Entity::Note(id)))?;
        Ok(assemble_note(note, &self.items, &self.tables)?)
    }

    /// Lists the user's notes without nested content.
    pub fn list_notes(&self, user_id: UserId) -> ServiceResult<Vec<Note>> {
        Ok(self.notes.list_notes(user_id)?)
    }

    /// Overwrites title/content and, when set, style of an owned note.
    pub fn update_note(
        &self,
        id: NoteId,
        user_id: UserId,
        draft: &NoteDraft,
    ) -> ServiceResult<Note> {
        Ok(self.notes.update_note(id, user_id, draft)?)
    }

    /// Deletes an owned note together with all of its children.
    pub fn delete_note(&self, id: NoteId, user_id: UserId) -> ServiceResult<()> {
        Ok(self.notes.delete_note(id, user_id)?)
    }
}
