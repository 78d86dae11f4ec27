//! Aggregate assembler for single-note fetches.

use crate::model::note::{Note, NoteAggregate};
use crate::repo::checklist_repo::ChecklistRepository;
use crate::repo::table_repo::TableRepository;
use crate::repo::RepoResult;

/// Attaches checklist items (creation order) and fully hydrated tables to `note`.
///
/// Missing children yield empty lists, never an error.
pub fn assemble_note<C, T>(note: Note, items: &C, tables: &T) -> RepoResult<NoteAggregate>
where
    C: ChecklistRepository,
    T: TableRepository,
{
    let checklist_items = items.list_by_note(note.id)?;
    let tables = tables.get_tables_by_note(note.id)?;
    Ok(NoteAggregate {
        note,
        checklist_items,
        tables,
    })
}
