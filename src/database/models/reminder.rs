use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Sqlite};

/// A stored reminder request. Nothing in the bot fires these.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reminder {
    pub id: i64,
    pub user_id: i64,
    pub chat_id: i64,
    pub reminder_text: String,
    pub reminder_time: NaiveDateTime,
}

impl Reminder {
    pub async fn create<'e, E>(
        executor: E,
        user_id: i64,
        chat_id: i64,
        reminder_text: String,
        reminder_time: NaiveDateTime,
    ) -> Result<Self, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let id = sqlx::query(
            "INSERT INTO reminders (user_id, chat_id, reminder_text, reminder_time) VALUES (?, ?, ?, ?)"
        )
        .bind(user_id)
        .bind(chat_id)
        .bind(&reminder_text)
        .bind(reminder_time)
        .execute(executor)
        .await?
        .last_insert_rowid();

        Ok(Reminder {
            id,
            user_id,
            chat_id,
            reminder_text,
            reminder_time,
        })
    }

    pub async fn find_by_chat<'e, E>(
        executor: E,
        chat_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Reminder>(
            "SELECT id, user_id, chat_id, reminder_text, reminder_time FROM reminders WHERE chat_id = ? ORDER BY reminder_time, id"
        )
        .bind(chat_id)
        .fetch_all(executor)
        .await
    }

    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reminders")
            .fetch_one(executor)
            .await
    }
}
