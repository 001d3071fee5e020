//! User Storage
//! Mission: Store and look up user accounts with SQLite

use crate::auth::models::User;
use crate::db::{self, StoreError};
use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

/// User-record contract consumed by login, registration and bootstrap
pub trait UserRepository: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Insert a user; `StoreError::Conflict` if the email is taken.
    fn insert_user(
        &self,
        email: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<i64, StoreError>;

    fn has_admin(&self) -> Result<bool, StoreError>;
}

const USER_COLUMNS: &str = "id, email, password_hash, is_admin, created_at, updated_at";

/// User storage with SQLite backend
pub struct UserStore {
    db_path: String,
}

impl UserStore {
    /// Expects `db::migrate` to have run against the same path.
    pub fn new(db_path: &str) -> Self {
        Self {
            db_path: db_path.to_string(),
        }
    }

    fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get(0)?,
            email: row.get(1)?,
            password_hash: row.get(2)?,
            is_admin: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    /// List all users, newest first (admin only)
    pub fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let conn = db::open(&self.db_path)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC, id DESC",
            USER_COLUMNS
        ))?;

        let users = stmt
            .query_map([], Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Delete a user by ID; their todos go with them. Returns false if absent.
    pub fn delete_user(&self, user_id: i64) -> Result<bool, StoreError> {
        let conn = db::open(&self.db_path)?;

        let rows_affected = conn.execute("DELETE FROM users WHERE id = ?1", params![user_id])?;
        if rows_affected > 0 {
            info!("Deleted user: {}", user_id);
        }
        Ok(rows_affected > 0)
    }

    /// Grant or revoke admin rights; `None` if the user does not exist.
    pub fn set_admin(&self, user_id: i64, is_admin: bool) -> Result<Option<User>, StoreError> {
        let conn = db::open(&self.db_path)?;

        let rows_affected = conn.execute(
            "UPDATE users SET is_admin = ?1, updated_at = ?2 WHERE id = ?3",
            params![is_admin, db::timestamp_now(), user_id],
        )?;
        if rows_affected == 0 {
            return Ok(None);
        }

        info!("User {} admin flag set to {}", user_id, is_admin);
        self.find_by_id(user_id)
    }
}

impl UserRepository for UserStore {
    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let conn = db::open(&self.db_path)?;

        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS),
                params![email],
                Self::row_to_user,
            )
            .optional()?;

        Ok(user)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let conn = db::open(&self.db_path)?;

        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
                params![id],
                Self::row_to_user,
            )
            .optional()?;

        Ok(user)
    }

    fn insert_user(
        &self,
        email: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<i64, StoreError> {
        let conn = db::open(&self.db_path)?;
        let now = db::timestamp_now();

        conn.execute(
            "INSERT INTO users (email, password_hash, is_admin, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![email, password_hash, is_admin, now],
        )
        .map_err(StoreError::from_write)?;

        let id = conn.last_insert_rowid();
        info!("Created user {} (admin: {})", id, is_admin);
        Ok(id)
    }

    fn has_admin(&self) -> Result<bool, StoreError> {
        let conn = db::open(&self.db_path)?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE is_admin = 1",
            [],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}
