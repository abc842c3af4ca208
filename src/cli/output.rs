use colored::Colorize;
use std::fmt;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
    Plain,
}

fn build_label(kind: MessageKind) -> Option<(&'static str, &'static str)> {
    match kind {
        MessageKind::Info => Some(("INFO", "[i]")),
        MessageKind::Success => Some(("SUCCESS", "[+]")),
        MessageKind::Warning => Some(("WARNING", "[!]")),
        MessageKind::Error => Some(("ERROR", "[x]")),
        MessageKind::Section | MessageKind::Plain => None,
    }
}

/// Renders `message` for the terminal, styling it only when `color` is set.
pub fn format_message(kind: MessageKind, message: impl fmt::Display, color: bool) -> String {
    let text = message.to_string();
    let formatted = match kind {
        MessageKind::Section => format!("--- {} ---", text.trim()),
        MessageKind::Plain => text,
        _ => match build_label(kind) {
            Some((label, icon)) => format!("{label}: {icon} {text}"),
            None => text,
        },
    };

    if !color {
        return formatted;
    }

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info | MessageKind::Plain => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_keeps_labels() {
        assert_eq!(
            format_message(MessageKind::Error, "boom", false),
            "ERROR: [x] boom"
        );
        assert_eq!(
            format_message(MessageKind::Section, " Totals ", false),
            "--- Totals ---"
        );
        assert_eq!(format_message(MessageKind::Plain, "a,b", false), "a,b");
    }
}
