//! `/start` registration logic.

use crate::database::connection::DatabaseManager;
use crate::database::models::User;
use crate::utils::logging::log_database_operation;

/// What `/start` found for the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// No user existed for the chat; one was created.
    Registered(User),
    /// The chat was already registered; nothing was written.
    Returning(User),
}

impl Registration {
    pub fn user(&self) -> &User {
        match self {
            Registration::Registered(user) | Registration::Returning(user) => user,
        }
    }

    /// Reply text for the chat, addressed to `display_name`.
    pub fn reply(&self, display_name: &str) -> String {
        match self {
            Registration::Registered(_) => format!("Hi, {display_name}! You have been registered."),
            Registration::Returning(_) => format!("Hi {display_name}, long time no see!"),
        }
    }
}

/// Creates the chat's user when absent and reads it back, within one storage session.
///
/// The insert must be the first statement: SQLite cannot upgrade a read
/// snapshot to a write once another chat has registered. Errors are returned
/// as-is; a username already taken by another chat surfaces as a unique
/// constraint violation.
pub async fn register(
    db: &DatabaseManager,
    chat_id: i64,
    username: Option<String>,
) -> Result<Registration, sqlx::Error> {
    let mut session = db.session().await?;

    log_database_operation("INSERT", "users", Some(&format!("chat_id={chat_id}")));
    let inserted = User::insert_if_absent(&mut *session, username.as_deref(), chat_id).await?;

    log_database_operation("SELECT", "users", Some(&format!("chat_id={chat_id}")));
    let user = User::find_by_chat_id(&mut *session, chat_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    session.commit().await?;

    Ok(if inserted {
        Registration::Registered(user)
    } else {
        Registration::Returning(user)
    })
}
