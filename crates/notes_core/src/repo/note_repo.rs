//! Note store: user-scoped CRUD over note rows.
//!
//! # Responsibility
//! - Persist notes and read them back scoped by owning user.
//! - Leave aggregate assembly (checklist items, tables) to the service layer.
//!
//! # Invariants
//! - Every read/update/delete filters on `id AND user_id`; a note owned by
//!   someone else is indistinguishable from a missing one.
//! - `list_notes` never loads nested content.
//! - Deleting a note relies on `ON DELETE CASCADE` for its children.

use crate::model::note::{Note, NoteDraft, NoteId};
use crate::model::user::UserId;
use crate::repo::{parse_style, Entity, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const NOTE_COLUMNS: &str = "id, title, content, style, user_id, created_at, updated_at";

/// Repository interface for note rows.
pub trait NoteRepository {
    /// Inserts one note for `owner` and returns it with id/timestamps populated.
    fn create_note(&self, owner: UserId, draft: &NoteDraft) -> RepoResult<Note>;
    /// Gets one note when it exists and belongs to `owner`.
    fn get_note(&self, id: NoteId, owner: UserId) -> RepoResult<Option<Note>>;
    /// Lists every note of `owner` in insertion order.
    fn list_notes(&self, owner: UserId) -> RepoResult<Vec<Note>>;
    /// Overwrites title/content (and style when given) of an owned note.
    fn update_note(&self, id: NoteId, owner: UserId, draft: &NoteDraft) -> RepoResult<Note>;
    /// Deletes an owned note and, through cascade, all of its children.
    fn delete_note(&self, id: NoteId, owner: UserId) -> RepoResult<()>;
}

/// SQLite-backed note store.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, owner: UserId, draft: &NoteDraft) -> RepoResult<Note> {
        let style = draft.style.unwrap_or_default();
        let mut stmt = self.conn.prepare_cached(&format!(
            "INSERT INTO notes (title, content, style, user_id)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {NOTE_COLUMNS};"
        ))?;
        let mut rows = stmt.query(params![
            draft.title.as_str(),
            draft.content.as_str(),
            style.as_str(),
            owner,
        ])?;

        match rows.next()? {
            Some(row) => parse_note_row(row),
            None => Err(RepoError::InvalidData(
                "note insert returned no row".to_string(),
            )),
        }
    }

    fn get_note(&self, id: NoteId, owner: UserId) -> RepoResult<Option<Note>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {NOTE_COLUMNS}
             FROM notes
             WHERE id = ?1
               AND user_id = ?2;"
        ))?;
        let mut rows = stmt.query(params![id, owner])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn list_notes(&self, owner: UserId) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {NOTE_COLUMNS}
             FROM notes
             WHERE user_id = ?1
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([owner])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn update_note(&self, id: NoteId, owner: UserId, draft: &NoteDraft) -> RepoResult<Note> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "UPDATE notes
             SET
                title = ?3,
                content = ?4,
                style = COALESCE(?5, style),
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1
               AND user_id = ?2
             RETURNING {NOTE_COLUMNS};"
        ))?;
        let updated = stmt
            .query_row(
                params![
                    id,
                    owner,
                    draft.title.as_str(),
                    draft.content.as_str(),
                    draft.style.map(|style| style.as_str()),
                ],
                |row| Ok(parse_note_row(row)),
            )
            .optional()?;

        match updated {
            Some(note) => note,
            None => Err(RepoError::NotFound(Entity::Note(id))),
        }
    }

    fn delete_note(&self, id: NoteId, owner: UserId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM notes WHERE id = ?1 AND user_id = ?2;",
            params![id, owner],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(Entity::Note(id)));
        }

        Ok(())
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let style_text: String = row.get("style")?;
    Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        style: parse_style(&style_text, "notes.style")?,
        user_id: row.get("user_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
