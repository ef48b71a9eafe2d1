pub mod download;
pub mod help;
pub mod remind;
pub mod start;
pub mod table;

pub use table::{CommandEntry, CommandTable};

use teloxide::types::Message;
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Reminder bot commands:")]
pub enum Command {
    #[command(description = "register in the bot")]
    Start,
    #[command(description = "show the list of commands")]
    Help,
    #[command(description = "save a reminder: /remind <text> <YYYY-MM-DD HH:MM>")]
    Remind(String),
    #[command(rename = "download_mp3", description = "convert audio from a link to MP3: /download_mp3 <url>")]
    DownloadMp3(String),
}

/// Who sent a command, as far as handlers care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: i64,
    pub username: Option<String>,
    pub display_name: String,
}

impl Sender {
    pub fn from_message(msg: &Message) -> Self {
        match msg.from() {
            Some(user) => Self {
                id: user.id.0 as i64,
                username: user.username.clone(),
                display_name: user
                    .username
                    .clone()
                    .unwrap_or_else(|| user.first_name.clone()),
            },
            // Channel posts carry no sender
            None => Self {
                id: 0,
                username: None,
                display_name: "there".to_string(),
            },
        }
    }
}
