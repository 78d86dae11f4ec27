//! SQLite storage bootstrap, schema migrations and connection pooling.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the notes core.
//! - Apply schema migrations in deterministic order.
//! - Hand out pooled connections per call and take them back afterwards.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Every connection has `foreign_keys=ON`, so note deletion cascades to
//!   checklist items and tables.
//! - Core code must not read/write application data before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod pool;

pub use open::{open_db, open_db_in_memory};
pub use pool::{DbPool, PooledConnection, DEFAULT_MAX_IDLE_CONNECTIONS};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// No pooled connection came back within the checkout timeout.
    PoolTimeout { waited_ms: u128 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::PoolTimeout { waited_ms } => {
                write!(f, "no pooled connection available after {waited_ms} ms")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::PoolTimeout { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
