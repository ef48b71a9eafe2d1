use chrono::NaiveDateTime;
use anyhow::{anyhow, Result};

/// Input and display format of reminder timestamps. No timezone is attached.
pub const REMINDER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn parse_reminder_time(input: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), REMINDER_TIME_FORMAT)
        .map_err(|e| anyhow!("'{}' does not match YYYY-MM-DD HH:MM: {}", input, e))
}

pub fn format_reminder_time(dt: &NaiveDateTime) -> String {
    dt.format(REMINDER_TIME_FORMAT).to_string()
}
