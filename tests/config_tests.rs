#![allow(clippy::unwrap_used)]

use reminder_bot::config::Config;
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;

// Mutex to ensure config tests run sequentially to avoid environment variable conflicts
static CONFIG_TEST_MUTEX: Mutex<()> = Mutex::new(());

const ALL_VARS: [&str; 7] = [
    "TELEGRAM_BOT_TOKEN",
    "DATABASE_URL",
    "HTTP_PORT",
    "DOWNLOADER_BIN",
    "TRANSCODER_BIN",
    "MEDIA_WORK_DIR",
    "MEDIA_TIMEOUT_SECS",
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_config_from_env_with_all_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TELEGRAM_BOT_TOKEN", "test_token_123");
    env::set_var("DATABASE_URL", "sqlite:test.db");
    env::set_var("HTTP_PORT", "8080");
    env::set_var("DOWNLOADER_BIN", "/opt/bin/yt-dlp");
    env::set_var("TRANSCODER_BIN", "/opt/bin/ffmpeg");
    env::set_var("MEDIA_WORK_DIR", "/var/tmp/reminder-bot");
    env::set_var("MEDIA_TIMEOUT_SECS", "60");

    let config = Config::from_env().unwrap();

    assert_eq!(config.telegram_bot_token, "test_token_123");
    assert_eq!(config.database_url, "sqlite:test.db");
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.downloader_bin, "/opt/bin/yt-dlp");
    assert_eq!(config.transcoder_bin, "/opt/bin/ffmpeg");
    assert_eq!(config.media_work_dir, PathBuf::from("/var/tmp/reminder-bot"));
    assert_eq!(config.media_timeout_secs, 60);

    clear_env();
}

#[test]
fn test_config_from_env_with_defaults() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    // Only set required token, let others use defaults
    env::set_var("TELEGRAM_BOT_TOKEN", "required_token");

    let config = Config::from_env().unwrap();

    assert_eq!(config.telegram_bot_token, "required_token");
    assert_eq!(config.database_url, "sqlite:./data/reminder_bot.db");
    assert_eq!(config.http_port, 3000);
    assert_eq!(config.downloader_bin, "yt-dlp");
    assert_eq!(config.transcoder_bin, "ffmpeg");
    assert_eq!(config.media_work_dir, env::temp_dir());
    assert_eq!(config.media_timeout_secs, 300);

    clear_env();
}

#[test]
fn test_config_missing_required_token() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    let result = Config::from_env();
    assert!(result.is_err());

    let error_msg = result.unwrap_err().to_string();
    assert!(error_msg.contains("TELEGRAM_BOT_TOKEN must be set"));
}

#[test]
fn test_config_invalid_port() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TELEGRAM_BOT_TOKEN", "test_token");
    env::set_var("HTTP_PORT", "invalid_port");

    let result = Config::from_env();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Invalid HTTP_PORT"));

    // Negative port
    env::set_var("HTTP_PORT", "-1");
    assert!(Config::from_env().is_err());

    clear_env();
}

#[test]
fn test_config_invalid_media_timeout() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TELEGRAM_BOT_TOKEN", "test_token");

    for value in ["0", "-5", "soon"] {
        env::set_var("MEDIA_TIMEOUT_SECS", value);
        let result = Config::from_env();
        assert!(result.is_err(), "Should reject MEDIA_TIMEOUT_SECS={value}");
        assert!(result.unwrap_err().to_string().contains("Invalid MEDIA_TIMEOUT_SECS"));
    }

    env::set_var("MEDIA_TIMEOUT_SECS", " 45 ");
    assert_eq!(Config::from_env().unwrap().media_timeout_secs, 45);

    clear_env();
}

#[test]
fn test_config_empty_values() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    // Empty token (should fail)
    env::set_var("TELEGRAM_BOT_TOKEN", "");
    assert!(Config::from_env().is_err());

    // Blank optional values fall back to their defaults
    env::set_var("TELEGRAM_BOT_TOKEN", "valid_token");
    env::set_var("DATABASE_URL", "");
    env::set_var("DOWNLOADER_BIN", "   ");
    env::set_var("MEDIA_TIMEOUT_SECS", "");
    let config = Config::from_env().unwrap();
    assert_eq!(config.database_url, "sqlite:./data/reminder_bot.db");
    assert_eq!(config.downloader_bin, "yt-dlp");
    assert_eq!(config.media_timeout_secs, 300);

    clear_env();
}

#[test]
fn test_config_whitespace_handling() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TELEGRAM_BOT_TOKEN", "  token_with_spaces  ");
    env::set_var("DATABASE_URL", "  sqlite:spaced.db  ");
    env::set_var("HTTP_PORT", "  3000  ");

    let config = Config::from_env().unwrap();

    // Environment variables should preserve whitespace as-is
    assert_eq!(config.telegram_bot_token, "  token_with_spaces  ");
    assert_eq!(config.database_url, "  sqlite:spaced.db  ");
    assert_eq!(config.http_port, 3000);

    clear_env();
}
