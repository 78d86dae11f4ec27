//! Process-wide connection pool.
//!
//! # Responsibility
//! - Own the database target for the whole process lifetime.
//! - Hand out one bootstrapped connection per call and take it back on drop.
//!
//! # Invariants
//! - A pooled connection is never shared by two callers at the same time.
//! - File pools open extra connections on demand; concurrent writers
//!   serialize on SQLite's file lock and the busy timeout.
//! - In-memory pools own exactly one connection. Callers queue for it, so
//!   writers serialize in the pool instead of hitting table locks.
//! - At most `max_idle` connections are parked; extra ones are closed on return.
//! - A caller must not check out a second connection while holding one.

use super::open::{open_db, open_db_in_memory};
use super::{DbError, DbResult};
use rusqlite::Connection;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Default number of idle connections parked by a file pool.
pub const DEFAULT_MAX_IDLE_CONNECTIONS: usize = 4;

/// Default wait for a connection to come back to an in-memory pool.
pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
enum PoolTarget {
    File(PathBuf),
    Memory,
}

/// Explicitly constructed connection pool passed to every call site.
pub struct DbPool {
    target: PoolTarget,
    idle: Mutex<Vec<Connection>>,
    returned: Condvar,
    max_idle: usize,
    checkout_timeout: Duration,
}

impl DbPool {
    /// Opens a pool over a database file, migrating it on first connect.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Self::open_with_capacity(path, DEFAULT_MAX_IDLE_CONNECTIONS)
    }

    /// Opens a file pool that parks at most `max_idle` connections.
    pub fn open_with_capacity(path: impl AsRef<Path>, max_idle: usize) -> DbResult<Self> {
        let path = path.as_ref().to_path_buf();
        let first = open_db(&path)?;
        Ok(Self::with_first(PoolTarget::File(path), first, max_idle.max(1)))
    }

    /// Opens a pool over a fresh private in-memory database.
    ///
    /// The pool holds the only connection to that database; concurrent
    /// callers wait for it, up to the checkout timeout.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self::with_first(PoolTarget::Memory, conn, 1))
    }

    /// Overrides how long an in-memory checkout waits before failing.
    pub fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }

    fn with_first(target: PoolTarget, first: Connection, max_idle: usize) -> Self {
        Self {
            target,
            idle: Mutex::new(vec![first]),
            returned: Condvar::new(),
            max_idle,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    /// Checks out one connection.
    ///
    /// File pools open a new connection when none is idle. In-memory pools
    /// wait for the single connection to be returned.
    ///
    /// # Errors
    /// - `DbError::PoolTimeout` when an in-memory checkout waits too long.
    /// - Any open/bootstrap error of a new file connection.
    pub fn get(&self) -> DbResult<PooledConnection<'_>> {
        let started_at = Instant::now();
        let mut idle = self.lock_idle();
        loop {
            if let Some(conn) = idle.pop() {
                return Ok(self.checkout(conn));
            }

            match &self.target {
                PoolTarget::File(path) => {
                    drop(idle);
                    let conn = open_db(path)?;
                    return Ok(self.checkout(conn));
                }
                PoolTarget::Memory => {
                    let remaining = self
                        .checkout_timeout
                        .saturating_sub(started_at.elapsed());
                    if remaining.is_zero() {
                        return Err(DbError::PoolTimeout {
                            waited_ms: started_at.elapsed().as_millis(),
                        });
                    }
                    idle = self
                        .returned
                        .wait_timeout(idle, remaining)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0;
                }
            }
        }
    }

    /// Returns the number of currently parked connections.
    pub fn idle_count(&self) -> usize {
        self.lock_idle().len()
    }

    fn checkout(&self, conn: Connection) -> PooledConnection<'_> {
        PooledConnection {
            pool: self,
            conn: Some(conn),
        }
    }

    fn lock_idle(&self) -> MutexGuard<'_, Vec<Connection>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn park(&self, conn: Connection) {
        let mut idle = self.lock_idle();
        if idle.len() < self.max_idle {
            idle.push(conn);
        }
        drop(idle);
        self.returned.notify_one();
    }
}

/// Connection checked out of a [`DbPool`]; returns itself to the pool on drop.
pub struct PooledConnection<'pool> {
    pool: &'pool DbPool,
    conn: Option<Connection>,
}

impl Deref for PooledConnection<'_> {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        // `conn` is only taken in `drop`.
        self.conn
            .as_ref()
            .unwrap_or_else(|| unreachable!("pooled connection used after release"))
    }
}

impl Drop for PooledConnection<'_> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            // A connection left inside a transaction is rolled back before reuse.
            if conn.is_autocommit() || conn.execute_batch("ROLLBACK;").is_ok() {
                self.pool.park(conn);
            }
        }
    }
}
