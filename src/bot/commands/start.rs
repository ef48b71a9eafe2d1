use teloxide::prelude::*;
use crate::bot::commands::Sender;
use crate::database::connection::DatabaseManager;
use crate::error::HandlerResult;
use crate::services::registration::{register, Registration};
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_command_error, log_command_start, log_command_success};

/// Registers the chat on first contact and greets it either way.
///
/// Storage failures are not answered in chat. They are returned to the
/// dispatcher, which logs them.
pub async fn handle_start(
    bot: Bot,
    msg: Message,
    db: &DatabaseManager,
) -> HandlerResult {
    let sender = Sender::from_message(&msg);
    let chat_id = msg.chat.id.0;
    log_command_start("/start", &sender.display_name, sender.id, chat_id, None);

    let registration = match register(db, chat_id, sender.username.clone()).await {
        Ok(registration) => registration,
        Err(e) => {
            log_command_error("/start", &sender.display_name, sender.id, chat_id, &e.to_string());
            return Err(e.into());
        }
    };

    let feedback = CommandFeedback::new(bot, msg.chat.id);
    let reply = registration.reply(&sender.display_name);
    let outcome = match &registration {
        Registration::Registered(user) => {
            feedback.success(&reply).await?;
            format!("registered as user {}", user.id)
        }
        Registration::Returning(user) => {
            feedback.info(&reply).await?;
            format!("already registered as user {}", user.id)
        }
    };

    log_command_success("/start", &sender.display_name, sender.id, chat_id, Some(&outcome));
    Ok(())
}
