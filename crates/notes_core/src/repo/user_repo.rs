//! Identity store: user credential records.
//!
//! # Responsibility
//! - Persist users and resolve username -> credential record.
//!
//! # Invariants
//! - `username` is unique; a constraint hit is reported as `Duplicate`, so two
//!   racing registrations cannot both succeed even after the service pre-check.

use crate::model::user::{NewUser, User};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

/// Repository interface for user identities.
pub trait UserRepository {
    /// Inserts one user and returns the stored record.
    fn create_user(&self, user: &NewUser) -> RepoResult<User>;
    /// Looks up one user by exact username.
    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
}

/// SQLite-backed identity store.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &NewUser) -> RepoResult<User> {
        let inserted = self.conn.query_row(
            "INSERT INTO users (username, password_hash)
             VALUES (?1, ?2)
             RETURNING id, username, password_hash, created_at;",
            params![user.username.as_str(), user.password_hash.as_str()],
            parse_user_row,
        );

        match inserted {
            Ok(user) => Ok(user),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::Duplicate(format!(
                    "users.username `{}`",
                    user.username
                )))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, username, password_hash, created_at
                 FROM users
                 WHERE username = ?1;",
                [username],
                parse_user_row,
            )
            .optional()?;
        Ok(user)
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        password_hash: row.get("password_hash")?,
        created_at: row.get("created_at")?,
    })
}
