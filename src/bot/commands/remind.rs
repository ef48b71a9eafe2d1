use teloxide::prelude::*;
use crate::bot::commands::Sender;
use crate::database::connection::DatabaseManager;
use crate::error::HandlerResult;
use crate::services::reminder::{schedule_reminder, ReminderRequest};
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{
    log_command_error, log_command_start, log_command_success, log_validation_error,
};

const REMIND_EXAMPLE: &str = "Example: /remind Buy milk 2023-10-31 12:00";

/// Validates the arguments, then stores the reminder.
///
/// Bad input and storage errors are both reported back to the chat; the
/// storage session is released on every path.
pub async fn handle_remind(
    bot: Bot,
    msg: Message,
    args: String,
    db: &DatabaseManager,
) -> HandlerResult {
    let sender = Sender::from_message(&msg);
    let chat_id = msg.chat.id.0;
    log_command_start("/remind", &sender.display_name, sender.id, chat_id, Some(&args));

    let feedback = CommandFeedback::new(bot, msg.chat.id);

    let request = match ReminderRequest::parse(&args) {
        Ok(request) => request,
        Err(e) => {
            log_validation_error("/remind", "arguments", &args, &e.to_string(), chat_id);
            feedback.validation_error(&e.to_string(), REMIND_EXAMPLE).await?;
            return Ok(());
        }
    };

    match schedule_reminder(db, sender.id, chat_id, &request).await {
        Ok(reminder) => {
            feedback.success(&request.confirmation()).await?;
            log_command_success(
                "/remind",
                &sender.display_name,
                sender.id,
                chat_id,
                Some(&format!("reminder {} at {}", reminder.id, request.formatted_time())),
            );
        }
        Err(e) => {
            log_command_error("/remind", &sender.display_name, sender.id, chat_id, &e.to_string());
            feedback.error(&format!("Error: {e}")).await?;
        }
    }

    Ok(())
}
