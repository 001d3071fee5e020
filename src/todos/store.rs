//! Todo Storage
//! Every query is scoped by owner so one user can never reach another's rows.

use crate::db::{self, StoreError};
use crate::todos::models::{Todo, TodoRequest};
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

const TODO_COLUMNS: &str = "id, user_id, title, description, completed, created_at, updated_at";

pub struct TodoStore {
    db_path: String,
}

impl TodoStore {
    pub fn new(db_path: &str) -> Self {
        Self {
            db_path: db_path.to_string(),
        }
    }

    fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
        Ok(Todo {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            completed: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    /// All todos of one user, newest first
    pub fn list_for_user(&self, user_id: i64) -> Result<Vec<Todo>, StoreError> {
        let conn = db::open(&self.db_path)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM todos WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
            TODO_COLUMNS
        ))?;

        let todos = stmt
            .query_map(params![user_id], Self::row_to_todo)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(todos)
    }

    pub fn get(&self, user_id: i64, todo_id: i64) -> Result<Option<Todo>, StoreError> {
        let conn = db::open(&self.db_path)?;

        let todo = conn
            .query_row(
                &format!(
                    "SELECT {} FROM todos WHERE id = ?1 AND user_id = ?2",
                    TODO_COLUMNS
                ),
                params![todo_id, user_id],
                Self::row_to_todo,
            )
            .optional()?;

        Ok(todo)
    }

    pub fn create(&self, user_id: i64, req: &TodoRequest) -> Result<Todo, StoreError> {
        let conn = db::open(&self.db_path)?;
        let now = db::timestamp_now();

        conn.execute(
            "INSERT INTO todos (user_id, title, description, completed, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![user_id, req.title, req.description, req.completed, now],
        )?;

        let id = conn.last_insert_rowid();
        debug!("Created todo {} for user {}", id, user_id);

        Ok(Todo {
            id,
            user_id,
            title: req.title.clone(),
            description: req.description.clone(),
            completed: req.completed,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Replace a todo's fields; `None` if it does not exist for this user.
    pub fn update(
        &self,
        user_id: i64,
        todo_id: i64,
        req: &TodoRequest,
    ) -> Result<Option<Todo>, StoreError> {
        let conn = db::open(&self.db_path)?;

        let rows_affected = conn.execute(
            "UPDATE todos SET title = ?1, description = ?2, completed = ?3, updated_at = ?4
             WHERE id = ?5 AND user_id = ?6",
            params![
                req.title,
                req.description,
                req.completed,
                db::timestamp_now(),
                todo_id,
                user_id
            ],
        )?;
        if rows_affected == 0 {
            return Ok(None);
        }

        self.get(user_id, todo_id)
    }

    /// Returns false if the todo does not exist for this user.
    pub fn delete(&self, user_id: i64, todo_id: i64) -> Result<bool, StoreError> {
        let conn = db::open(&self.db_path)?;

        let rows_affected = conn.execute(
            "DELETE FROM todos WHERE id = ?1 AND user_id = ?2",
            params![todo_id, user_id],
        )?;

        Ok(rows_affected > 0)
    }
}
