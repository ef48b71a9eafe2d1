use std::sync::Arc;
use teloxide::prelude::*;
use crate::bot::commands::{
    download::handle_download_mp3, help::handle_help, remind::handle_remind,
    start::handle_start, Command, CommandTable,
};
use crate::database::connection::DatabaseManager;
use crate::error::HandlerResult;
use crate::services::media::MediaPipeline;

/// Routes a parsed command to its single handler.
pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    db: DatabaseManager,
    commands: CommandTable,
    pipeline: Arc<MediaPipeline>,
) -> HandlerResult {
    match cmd {
        Command::Start => handle_start(bot, msg, &db).await,
        Command::Help => handle_help(bot, msg, &commands).await,
        Command::Remind(args) => handle_remind(bot, msg, args, &db).await,
        Command::DownloadMp3(args) => handle_download_mp3(bot, msg, args, &pipeline).await,
    }
}
