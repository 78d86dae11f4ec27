//! Checklist store: CRUD over checklist items keyed by item id.
//!
//! # Invariants
//! - No ownership filtering happens here; callers run the ownership guard on
//!   the owning note first.
//! - Items of one note are listed by `created_at ASC, id ASC`.

use crate::model::checklist::{ChecklistItem, ChecklistItemId, NewChecklistItem};
use crate::model::note::NoteId;
use crate::repo::{bool_to_int, parse_bool, parse_style, Entity, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ITEM_COLUMNS: &str = "id, text, completed, style, note_id, created_at, updated_at";

/// Repository interface for checklist items.
pub trait ChecklistRepository {
    fn create_item(&self, item: &NewChecklistItem) -> RepoResult<ChecklistItem>;
    fn list_by_note(&self, note_id: NoteId) -> RepoResult<Vec<ChecklistItem>>;
    fn get_item(&self, id: ChecklistItemId) -> RepoResult<Option<ChecklistItem>>;
    /// Full overwrite of text/completed/style; bumps `updated_at`.
    fn update_item(&self, item: &ChecklistItem) -> RepoResult<ChecklistItem>;
    fn delete_item(&self, id: ChecklistItemId) -> RepoResult<()>;
}

/// SQLite-backed checklist store.
pub struct SqliteChecklistRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteChecklistRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ChecklistRepository for SqliteChecklistRepository<'_> {
    fn create_item(&self, item: &NewChecklistItem) -> RepoResult<ChecklistItem> {
        let style = item.style.unwrap_or_default();
        self.conn.query_row(
            &format!(
                "INSERT INTO checklist_items (text, style, note_id)
                 VALUES (?1, ?2, ?3)
                 RETURNING {ITEM_COLUMNS};"
            ),
            params![item.text.as_str(), style.as_str(), item.note_id],
            |row| Ok(parse_item_row(row)),
        )?
    }

    fn list_by_note(&self, note_id: NoteId) -> RepoResult<Vec<ChecklistItem>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {ITEM_COLUMNS}
             FROM checklist_items
             WHERE note_id = ?1
             ORDER BY created_at ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([note_id])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }

    fn get_item(&self, id: ChecklistItemId) -> RepoResult<Option<ChecklistItem>> {
        let item = self
            .conn
            .query_row(
                &format!("SELECT {ITEM_COLUMNS} FROM checklist_items WHERE id = ?1;"),
                [id],
                |row| Ok(parse_item_row(row)),
            )
            .optional()?;
        item.transpose()
    }

    fn update_item(&self, item: &ChecklistItem) -> RepoResult<ChecklistItem> {
        let updated = self
            .conn
            .query_row(
                &format!(
                    "UPDATE checklist_items
                     SET
                        text = ?2,
                        completed = ?3,
                        style = ?4,
                        updated_at = (strftime('%s', 'now') * 1000)
                     WHERE id = ?1
                     RETURNING {ITEM_COLUMNS};"
                ),
                params![
                    item.id,
                    item.text.as_str(),
                    bool_to_int(item.completed),
                    item.style.as_str(),
                ],
                |row| Ok(parse_item_row(row)),
            )
            .optional()?;

        match updated {
            Some(item) => item,
            None => Err(RepoError::NotFound(Entity::ChecklistItem(item.id))),
        }
    }

    fn delete_item(&self, id: ChecklistItemId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM checklist_items WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(Entity::ChecklistItem(id)));
        }

        Ok(())
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<ChecklistItem> {
    let style_text: String = row.get("style")?;
    Ok(ChecklistItem {
        id: row.get("id")?,
        text: row.get("text")?,
        completed: parse_bool(row.get("completed")?, "checklist_items.completed")?,
        style: parse_style(&style_text, "checklist_items.style")?,
        note_id: row.get("note_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
