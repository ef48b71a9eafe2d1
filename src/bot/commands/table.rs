//! The fixed list of commands the bot answers to.

use std::sync::Arc;
use teloxide::types::BotCommand;
use teloxide::utils::command::BotCommands;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    pub name: String,
    pub description: String,
}

impl CommandEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into().trim_start_matches('/').to_string(),
            description: description.into(),
        }
    }
}

/// Immutable command list built once at startup and shared with the dispatcher.
///
/// Order is declaration order; `/help` and the Telegram command menu both
/// follow it.
#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: Arc<[CommandEntry]>,
}

impl CommandTable {
    pub fn new(entries: Vec<CommandEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Builds the table from a `BotCommands` enum, skipping hidden commands.
    pub fn from_commands<C: BotCommands>() -> Self {
        Self::new(
            C::bot_commands()
                .into_iter()
                .map(|cmd| CommandEntry::new(cmd.command, cmd.description))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn help_text(&self) -> String {
        let mut text = String::from("Available commands:");
        for entry in self.entries.iter() {
            text.push_str(&format!("\n/{} - {}", entry.name, entry.description));
        }
        text
    }

    /// The table in the shape `set_my_commands` expects.
    pub fn to_bot_commands(&self) -> Vec<BotCommand> {
        self.entries
            .iter()
            .map(|entry| BotCommand::new(entry.name.clone(), entry.description.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_strips_leading_slash() {
        let entry = CommandEntry::new("/start", "register");
        assert_eq!(entry.name, "start");
    }

    #[test]
    fn test_help_text_keeps_order() {
        let table = CommandTable::new(vec![
            CommandEntry::new("b", "second letter"),
            CommandEntry::new("a", "first letter"),
        ]);
        assert_eq!(
            table.help_text(),
            "Available commands:\n/b - second letter\n/a - first letter"
        );
    }

    #[test]
    fn test_empty_table() {
        let table = CommandTable::new(Vec::new());
        assert!(table.entries().is_empty());
        assert_eq!(table.help_text(), "Available commands:");
        assert!(table.to_bot_commands().is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let table = CommandTable::new(vec![CommandEntry::new("help", "show help")]);
        let clone = table.clone();
        assert!(std::ptr::eq(table.entries(), clone.entries()));
    }
}
