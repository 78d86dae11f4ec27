//! Checklist item use-case service.
//!
//! # Responsibility
//! - Resolve the owning note of every item and run the ownership guard before
//!   touching the checklist store.
//!
//! # Invariants
//! - Update/delete read the item first to learn its `note_id`.
//! - A foreign item is reported as `NotFound(ChecklistItem(id))`, exactly like a
//!   missing one.

use crate::model::checklist::{
    ChecklistItem, ChecklistItemId, ChecklistItemPatch, NewChecklistItem,
};
use crate::model::note::NoteId;
use crate::model::style::TextStyle;
use crate::model::user::UserId;
use crate::repo::checklist_repo::ChecklistRepository;
use crate::repo::note_repo::NoteRepository;
use crate::repo::Entity;
use crate::service::ownership::verify_note_ownership;
use crate::service::{ServiceError, ServiceResult};

pub struct ChecklistService<N, C> {
    notes: N,
    items: C,
}

impl<N, C> ChecklistService<N, C>
where
    N: NoteRepository,
    C: ChecklistRepository,
{
    pub fn new(notes: N, items: C) -> Self {
        Self { notes, items }
    }

    /// Adds an uncompleted item to an owned note.
    pub fn create_item(
        &self,
        note_id: NoteId,
        text: impl Into<String>,
        style: Option<TextStyle>,
        user_id: UserId,
    ) -> ServiceResult<ChecklistItem> {
        verify_note_ownership(&self.notes, note_id, user_id)?;
        Ok(self.items.create_item(&NewChecklistItem {
            note_id,
            text: text.into(),
            style,
        })?)
    }

    /// Lists items of an owned note in creation order.
    pub fn list_items(&self, note_id: NoteId, user_id: UserId) -> ServiceResult<Vec<ChecklistItem>> {
        verify_note_ownership(&self.notes, note_id, user_id)?;
        Ok(self.items.list_by_note(note_id)?)
    }

    /// Applies `patch` to an item whose note the user owns.
    pub fn update_item(
        &self,
        item_id: ChecklistItemId,
        patch: &ChecklistItemPatch,
        user_id: UserId,
    ) -> ServiceResult<ChecklistItem> {
        let mut item = self.load_owned(item_id, user_id)?;
        item.apply(patch);
        Ok(self.items.update_item(&item)?)
    }

    /// Deletes an item whose note the user owns.
    pub fn delete_item(&self, item_id: ChecklistItemId, user_id: UserId) -> ServiceResult<()> {
        self.load_owned(item_id, user_id)?;
        Ok(self.items.delete_item(item_id)?)
    }

    fn load_owned(&self, item_id: ChecklistItemId, user_id: UserId) -> ServiceResult<ChecklistItem> {
        let item = self
            .items
            .get_item(item_id)?
            .ok_or(ServiceError::NotFound(Entity::ChecklistItem(item_id)))?;
        verify_note_ownership(&self.notes, item.note_id, user_id)
            .map_err(|err| err.conceal_as(Entity::ChecklistItem(item_id)))?;
        Ok(item)
    }
}
