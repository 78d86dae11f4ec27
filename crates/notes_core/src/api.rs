//! Transport-facing facade over the notes core.
//!
//! # Responsibility
//! - Check one pooled connection out per call and build the SQLite stores
//!   and services over it.
//! - Emit exactly one structured outcome line per call.
//!
//! # Invariants
//! - The connection is returned to the pool before the call returns.
//! - Log lines carry ids and error kinds only, never credentials or content.
//! - Pool failures surface as `ServiceError::Storage`.

use crate::auth::{Argon2CredentialHasher, CredentialHasher, SignedTokenIssuer, TokenIssuer};
use crate::config::CoreConfig;
use crate::db::DbPool;
use crate::model::checklist::{ChecklistItem, ChecklistItemId, ChecklistItemPatch};
use crate::model::note::{Note, NoteAggregate, NoteDraft, NoteId};
use crate::model::style::TextStyle;
use crate::model::table::{NoteTable, TableId, TableRow};
use crate::model::user::{User, UserId};
use crate::repo::checklist_repo::SqliteChecklistRepository;
use crate::repo::note_repo::SqliteNoteRepository;
use crate::repo::table_repo::SqliteTableRepository;
use crate::repo::user_repo::SqliteUserRepository;
use crate::repo::RepoError;
use crate::service::auth_service::AuthService;
use crate::service::checklist_service::ChecklistService;
use crate::service::note_service::NoteService;
use crate::service::table_service::TableService;
use crate::service::{ServiceError, ServiceResult};
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

type SqliteNoteService<'c> = NoteService<
    SqliteNoteRepository<'c>,
    SqliteChecklistRepository<'c>,
    SqliteTableRepository<'c>,
>;

/// Entry point used by transports (CLI, HTTP adapters, tests).
pub struct NotesApi<H = Argon2CredentialHasher, T = SignedTokenIssuer> {
    pool: DbPool,
    hasher: H,
    tokens: T,
}

impl NotesApi {
    /// Builds the production facade from a validated config.
    pub fn from_config(config: &CoreConfig) -> ServiceResult<Self> {
        let pool = match &config.database.path {
            Some(path) => DbPool::open_with_capacity(path, config.database.max_idle_connections),
            None => DbPool::open_in_memory(),
        }
        .map_err(|err| ServiceError::Storage(RepoError::Db(err)))?;

        let hasher = Argon2CredentialHasher::with_params(
            config.auth.argon2_memory_kib,
            config.auth.argon2_iterations,
            config.auth.argon2_parallelism,
        )?;
        let tokens = SignedTokenIssuer::new(&config.auth.token_secret, config.auth.token_ttl());

        Ok(Self::new(pool, hasher, tokens))
    }
}

impl<H, T> NotesApi<H, T>
where
    H: CredentialHasher,
    T: TokenIssuer,
{
    pub fn new(pool: DbPool, hasher: H, tokens: T) -> Self {
        Self {
            pool,
            hasher,
            tokens,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn create_user(&self, username: &str, password: &str) -> ServiceResult<User> {
        self.run("create_user", |conn| {
            self.auth_service(conn).register(username, password)
        })
    }

    pub fn find_user_by_name(&self, username: &str) -> ServiceResult<User> {
        self.run("find_user_by_name", |conn| {
            self.auth_service(conn).find_user_by_name(username)
        })
    }

    /// Returns a bearer token for valid credentials.
    pub fn login(&self, username: &str, password: &str) -> ServiceResult<String> {
        self.run("login", |conn| self.auth_service(conn).login(username, password))
    }

    /// Resolves a bearer token without touching storage.
    pub fn authenticate(&self, token: &str) -> ServiceResult<UserId> {
        self.timed("authenticate", || {
            self.tokens
                .verify(token)
                .map_err(|_| ServiceError::Unauthenticated)
        })
    }

    pub fn create_note(&self, user_id: UserId, draft: &NoteDraft) -> ServiceResult<Note> {
        self.run("create_note", |conn| {
            note_service(conn).create_note(user_id, draft)
        })
    }

    pub fn get_note(&self, note_id: NoteId, user_id: UserId) -> ServiceResult<NoteAggregate> {
        self.run("get_note", |conn| note_service(conn).get_note(note_id, user_id))
    }

    pub fn list_notes(&self, user_id: UserId) -> ServiceResult<Vec<Note>> {
        self.run("list_notes", |conn| note_service(conn).list_notes(user_id))
    }

    pub fn update_note(
        &self,
        note_id: NoteId,
        user_id: UserId,
        draft: &NoteDraft,
    ) -> ServiceResult<Note> {
        self.run("update_note", |conn| {
            note_service(conn).update_note(note_id, user_id, draft)
        })
    }

    pub fn delete_note(&self, note_id: NoteId, user_id: UserId) -> ServiceResult<()> {
        self.run("delete_note", |conn| {
            note_service(conn).delete_note(note_id, user_id)
        })
    }

    pub fn create_checklist_item(
        &self,
        note_id: NoteId,
        text: &str,
        style: Option<TextStyle>,
        user_id: UserId,
    ) -> ServiceResult<ChecklistItem> {
        self.run("create_checklist_item", |conn| {
            checklist_service(conn).create_item(note_id, text, style, user_id)
        })
    }

    pub fn update_checklist_item(
        &self,
        item_id: ChecklistItemId,
        patch: &ChecklistItemPatch,
        user_id: UserId,
    ) -> ServiceResult<ChecklistItem> {
        self.run("update_checklist_item", |conn| {
            checklist_service(conn).update_item(item_id, patch, user_id)
        })
    }

    pub fn delete_checklist_item(
        &self,
        item_id: ChecklistItemId,
        user_id: UserId,
    ) -> ServiceResult<()> {
        self.run("delete_checklist_item", |conn| {
            checklist_service(conn).delete_item(item_id, user_id)
        })
    }

    pub fn list_checklist_items(
        &self,
        note_id: NoteId,
        user_id: UserId,
    ) -> ServiceResult<Vec<ChecklistItem>> {
        self.run("list_checklist_items", |conn| {
            checklist_service(conn).list_items(note_id, user_id)
        })
    }

    pub fn create_table(
        &self,
        note_id: NoteId,
        title: &str,
        columns: &[String],
        user_id: UserId,
    ) -> ServiceResult<NoteTable> {
        self.run("create_table", |conn| {
            table_service(conn).create_table(note_id, title, columns, user_id)
        })
    }

    pub fn add_table_row(
        &self,
        table_id: TableId,
        cells: &[String],
        user_id: UserId,
    ) -> ServiceResult<TableRow> {
        self.run("add_table_row", |conn| {
            table_service(conn).add_row(table_id, cells, user_id)
        })
    }

    pub fn list_tables(&self, note_id: NoteId, user_id: UserId) -> ServiceResult<Vec<NoteTable>> {
        self.run("list_tables", |conn| {
            table_service(conn).list_tables(note_id, user_id)
        })
    }

    fn auth_service<'a>(
        &'a self,
        conn: &'a Connection,
    ) -> AuthService<'a, SqliteUserRepository<'a>, H, T> {
        AuthService::new(SqliteUserRepository::new(conn), &self.hasher, &self.tokens)
    }

    fn run<R>(
        &self,
        op: &'static str,
        call: impl FnOnce(&Connection) -> ServiceResult<R>,
    ) -> ServiceResult<R> {
        self.timed(op, || {
            let conn = self
                .pool
                .get()
                .map_err(|err| ServiceError::Storage(RepoError::Db(err)))?;
            call(&conn)
        })
    }

    fn timed<R>(&self, op: &'static str, call: impl FnOnce() -> ServiceResult<R>) -> ServiceResult<R> {
        let started_at = Instant::now();
        let result = call();
        let duration_ms = started_at.elapsed().as_millis();

        match &result {
            Ok(_) => info!(
                "event=api_call module=api op={} status=ok duration_ms={}",
                op, duration_ms
            ),
            Err(err @ (ServiceError::Storage(_) | ServiceError::Credential(_))) => error!(
                "event=api_call module=api op={} status=error error_kind={} duration_ms={} error={}",
                op,
                err.kind(),
                duration_ms,
                crate::logging::sanitize_message(&err.to_string(), 200)
            ),
            Err(err) => info!(
                "event=api_call module=api op={} status=error error_kind={} duration_ms={}",
                op,
                err.kind(),
                duration_ms
            ),
        }

        result
    }
}

fn note_service(conn: &Connection) -> SqliteNoteService<'_> {
    NoteService::new(
        SqliteNoteRepository::new(conn),
        SqliteChecklistRepository::new(conn),
        SqliteTableRepository::new(conn),
    )
}

fn checklist_service(
    conn: &Connection,
) -> ChecklistService<SqliteNoteRepository<'_>, SqliteChecklistRepository<'_>> {
    ChecklistService::new(
        SqliteNoteRepository::new(conn),
        SqliteChecklistRepository::new(conn),
    )
}

fn table_service(conn: &Connection) -> TableService<SqliteNoteRepository<'_>, SqliteTableRepository<'_>> {
    TableService::new(
        SqliteNoteRepository::new(conn),
        SqliteTableRepository::new(conn),
    )
}
