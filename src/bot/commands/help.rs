use teloxide::prelude::*;
use crate::bot::commands::CommandTable;
use crate::error::HandlerResult;

pub async fn handle_help(
    bot: Bot,
    msg: Message,
    commands: &CommandTable,
) -> HandlerResult {
    bot.send_message(msg.chat.id, commands.help_text()).await?;
    Ok(())
}
