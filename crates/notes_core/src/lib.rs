//! Core domain logic for the multi-tenant notes backend.
//! This crate is the single source of truth for ownership and content invariants.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use api::NotesApi;
pub use auth::{
    Argon2CredentialHasher, CredentialError, CredentialHasher, SignedTokenIssuer, TokenError,
    TokenIssuer,
};
pub use config::{read_config, ConfigError, CoreConfig, LoggingConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbPool};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::checklist::{ChecklistItem, ChecklistItemId, ChecklistItemPatch};
pub use model::note::{Note, NoteAggregate, NoteDraft, NoteId};
pub use model::style::TextStyle;
pub use model::table::{NoteTable, TableCell, TableColumn, TableId, TableRow};
pub use model::user::{User, UserId};
pub use model::validation::ValidationError;
pub use repo::{Entity, RepoError, RepoResult};
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
