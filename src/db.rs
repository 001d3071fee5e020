//! SQLite plumbing shared by the user and todo stores.

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, ErrorCode};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors surfaced by the data-access layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A UNIQUE constraint rejected the write (duplicate email).
    #[error("unique constraint violated")]
    Conflict,
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    /// Classify a write error, turning UNIQUE violations into `Conflict`.
    pub(crate) fn from_write(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
                StoreError::Conflict
            }
            _ => StoreError::Sqlite(err),
        }
    }
}

/// Fixed-width RFC 3339 timestamp so text ordering matches time ordering.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Open a connection with foreign keys enforced.
pub fn open(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(conn)
}

/// Create the users and todos tables if they do not exist yet.
pub fn migrate(db_path: &str) -> Result<(), StoreError> {
    let conn = open(db_path)?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            is_admin INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_todos_user_id ON todos(user_id);",
    )?;

    info!("Database schema ready at {}", db_path);
    Ok(())
}
