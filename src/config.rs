use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/reminder_bot.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub http_port: u16,
    pub downloader_bin: String,
    pub transcoder_bin: String,
    pub media_work_dir: PathBuf,
    pub media_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let database_url = non_blank_var("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let downloader_bin = non_blank_var("DOWNLOADER_BIN")
            .unwrap_or_else(|| "yt-dlp".to_string());
        let transcoder_bin = non_blank_var("TRANSCODER_BIN")
            .unwrap_or_else(|| "ffmpeg".to_string());

        let media_work_dir = non_blank_var("MEDIA_WORK_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(env::temp_dir);

        let media_timeout_secs = match non_blank_var("MEDIA_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(anyhow!("Invalid MEDIA_TIMEOUT_SECS")),
            },
            None => 300,
        };

        Ok(Config {
            telegram_bot_token: token,
            database_url,
            http_port,
            downloader_bin,
            transcoder_bin,
            media_work_dir,
            media_timeout_secs,
        })
    }
}

/// Reads an environment variable, treating unset and whitespace-only values alike.
fn non_blank_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
