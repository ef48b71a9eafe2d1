pub mod message;

use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*};
use crate::bot::commands::{Command, CommandTable};
use crate::database::connection::DatabaseManager;
use crate::error::HandlerError;
use crate::services::media::MediaPipeline;

/// Everything the command endpoints need, bundled at startup.
pub struct BotHandler {
    pub db: DatabaseManager,
    pub commands: CommandTable,
    pub pipeline: Arc<MediaPipeline>,
}

impl BotHandler {
    pub fn new(db: DatabaseManager, commands: CommandTable, pipeline: MediaPipeline) -> Self {
        Self {
            db,
            commands,
            pipeline: Arc::new(pipeline),
        }
    }

    /// Message updates that parse as a [`Command`] reach `command_handler`;
    /// anything else matches no branch.
    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        let db = self.db.clone();
        let commands = self.commands.clone();
        let pipeline = self.pipeline.clone();

        Update::filter_message()
            .filter_command::<Command>()
            .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                let db = db.clone();
                let commands = commands.clone();
                let pipeline = pipeline.clone();
                async move { message::command_handler(bot, msg, cmd, db, commands, pipeline).await }
            })
    }
}
