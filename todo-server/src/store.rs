//! Todo repository.
//!
//! Writes return the row as stored, re-read after the statement, so any
//! column coercion by the backend shows up in the response. `update_title`
//! looks the row up first: MySQL reports zero affected rows when an UPDATE
//! writes the value already stored, so the affected-row count cannot tell
//! "missing" apart from "unchanged".

use serde::{Deserialize, Serialize};
use sqlx::{AnyPool, FromRow};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("todo {id} not found")]
    NotFound { id: i64 },
}

pub struct TodoStore<'a> {
    pool: &'a AnyPool,
}

impl<'a> TodoStore<'a> {
    pub fn new(pool: &'a AnyPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let todos = sqlx::query_as::<_, Todo>("SELECT id, title FROM todos ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(todos)
    }

    pub async fn create(&self, title: String) -> Result<Todo, StoreError> {
        // The generated id is per-connection state, so the fallback lookup
        // must run on the connection that did the insert.
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query("INSERT INTO todos (title) VALUES (?)")
            .bind(title.as_str())
            .execute(&mut *conn)
            .await?;

        let id = match result.last_insert_id() {
            Some(id) => id,
            None => {
                let query = if conn.backend_name().eq_ignore_ascii_case("sqlite") {
                    "SELECT last_insert_rowid()"
                } else {
                    "SELECT CAST(LAST_INSERT_ID() AS SIGNED)"
                };
                sqlx::query_scalar::<_, i64>(query)
                    .fetch_one(&mut *conn)
                    .await?
            }
        };
        drop(conn);

        tracing::debug!(id, "todo created");
        self.get(id).await
    }

    pub async fn update_title(&self, id: i64, title: String) -> Result<Todo, StoreError> {
        self.get(id).await?;

        sqlx::query("UPDATE todos SET title = ? WHERE id = ?")
            .bind(title.as_str())
            .bind(id)
            .execute(self.pool)
            .await?;

        tracing::debug!(id, "todo updated");
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        tracing::debug!(id, "todo deleted");
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<Todo, StoreError> {
        sqlx::query_as::<_, Todo>("SELECT id, title FROM todos WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StoreError::NotFound { id })
    }
}
