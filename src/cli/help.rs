/// Name, usage, and one-line description of every shell command.
pub const COMMANDS: &[(&str, &str, &str)] = &[
    (
        "income",
        "income <month> <amount> <category> <description> <method>",
        "Record income on the 1st of a month",
    ),
    (
        "expense",
        "expense <month> <amount> <category> <description> <method>",
        "Record an expense if the month's income covers it",
    ),
    ("list", "list", "Show every record"),
    ("month", "month <month>", "Income, expense, and balance for a month"),
    (
        "edit",
        "edit <id> <amount> <category> <description> <method>",
        "Change a record's amount, labels, or payment method",
    ),
    ("delete", "delete <id>", "Remove a record"),
    ("largest", "largest", "Largest expense in each month"),
    ("category", "category <text>", "Expenses whose category contains text"),
    ("duplicates", "duplicates", "Groups of duplicate records"),
    ("method", "method <cash|card|online>", "Records paid with a method"),
    ("summary", "summary", "Overall totals and savings"),
    ("export", "export [path]", "Write the summary CSV"),
    ("version", "version", "Show build information"),
    ("help", "help [command]", "List commands or show one command's usage"),
    ("exit", "exit", "Leave the shell"),
];

pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|(name, _, _)| *name)
}

pub fn usage(command: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .find(|(name, _, _)| *name == command)
        .map(|(_, usage, _)| *usage)
}

pub fn help_lines() -> Vec<String> {
    COMMANDS
        .iter()
        .map(|(_, usage, about)| format!("  {:<62} {}", usage, about))
        .collect()
}
