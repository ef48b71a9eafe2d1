//! Escaping for Telegram's MarkdownV2 parse mode.

/// Escapes every character MarkdownV2 treats as markup so it renders literally.
///
/// # Example
/// ```
/// use reminder_bot::utils::markdown::escape_markdown;
///
/// let escaped = escape_markdown("Reminder set for: 2023-10-31 12:00!");
/// assert_eq!(escaped, "Reminder set for: 2023\\-10\\-31 12:00\\!");
/// ```
pub fn escape_markdown(text: &str) -> String {
    // Backslash goes first so the escapes added below stay intact
    text.replace('\\', "\\\\")
        .replace('_', "\\_")
        .replace('*', "\\*")
        .replace('[', "\\[")
        .replace(']', "\\]")
        .replace('(', "\\(")
        .replace(')', "\\)")
        .replace('~', "\\~")
        .replace('`', "\\`")
        .replace('>', "\\>")
        .replace('#', "\\#")
        .replace('+', "\\+")
        .replace('-', "\\-")
        .replace('=', "\\=")
        .replace('|', "\\|")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace('.', "\\.")
        .replace('!', "\\!")
}
