//! `/remind` argument parsing and persistence.

use chrono::NaiveDateTime;
use crate::database::connection::DatabaseManager;
use crate::database::models::Reminder;
use crate::error::ReminderInputError;
use crate::utils::datetime::{format_reminder_time, parse_reminder_time};
use crate::utils::logging::{log_database_error, log_database_operation};

/// A validated `/remind` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub text: String,
    pub time: NaiveDateTime,
}

impl ReminderRequest {
    /// Parses `<text...> <YYYY-MM-DD> <HH:MM>`.
    ///
    /// The timestamp is the last two whitespace-separated tokens; everything
    /// before it is the reminder text, with one pair of enclosing double
    /// quotes removed.
    pub fn parse(args: &str) -> Result<Self, ReminderInputError> {
        let tokens: Vec<&str> = args.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(ReminderInputError::Usage);
        }

        let split = tokens.len() - 2;
        let time_str = tokens[split..].join(" ");
        let time = parse_reminder_time(&time_str)
            .map_err(|_| ReminderInputError::InvalidTime(time_str.clone()))?;

        let text = strip_enclosing_quotes(&tokens[..split].join(" ")).trim().to_string();
        if text.is_empty() {
            return Err(ReminderInputError::Usage);
        }

        Ok(Self { text, time })
    }

    pub fn formatted_time(&self) -> String {
        format_reminder_time(&self.time)
    }

    /// Reply sent once the reminder is stored.
    pub fn confirmation(&self) -> String {
        format!("Reminder set for: {}!", self.formatted_time())
    }
}

fn strip_enclosing_quotes(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(text)
}

/// Stores the reminder in its own storage session. Nothing is committed on error.
pub async fn schedule_reminder(
    db: &DatabaseManager,
    user_id: i64,
    chat_id: i64,
    request: &ReminderRequest,
) -> Result<Reminder, sqlx::Error> {
    let mut session = db.session().await?;

    log_database_operation("INSERT", "reminders", Some(&format!("chat_id={chat_id}")));
    let reminder = match Reminder::create(
        &mut *session,
        user_id,
        chat_id,
        request.text.clone(),
        request.time,
    ).await {
        Ok(reminder) => reminder,
        Err(e) => {
            log_database_error("INSERT", "reminders", &e.to_string(), Some(&format!("chat_id={chat_id}")));
            return Err(e);
        }
    };
    session.commit().await?;

    Ok(reminder)
}
