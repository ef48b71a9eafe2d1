use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Sqlite};

/// A chat registered through `/start`. At most one user exists per chat id.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub chat_id: i64,
}

impl User {
    pub async fn find_by_chat_id<'e, E>(
        executor: E,
        chat_id: i64,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, User>(
            "SELECT id, username, chat_id FROM users WHERE chat_id = ?"
        )
        .bind(chat_id)
        .fetch_optional(executor)
        .await
    }

    pub async fn create<'e, E>(
        executor: E,
        username: Option<String>,
        chat_id: i64,
    ) -> Result<Self, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let id = sqlx::query(
            "INSERT INTO users (username, chat_id) VALUES (?, ?)"
        )
        .bind(&username)
        .bind(chat_id)
        .execute(executor)
        .await?
        .last_insert_rowid();

        Ok(User {
            id,
            username,
            chat_id,
        })
    }

    /// Inserts a user unless the chat already has one. Returns whether a row was written.
    ///
    /// Only a `chat_id` conflict is skipped; a taken username still fails.
    pub async fn insert_if_absent<'e, E>(
        executor: E,
        username: Option<&str>,
        chat_id: i64,
    ) -> Result<bool, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "INSERT INTO users (username, chat_id) VALUES (?, ?) ON CONFLICT(chat_id) DO NOTHING"
        )
        .bind(username)
        .bind(chat_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(executor)
            .await
    }
}
