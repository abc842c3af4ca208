use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid amount: {0} (amount must be a positive number)")]
    InvalidAmount(f64),
    #[error("Invalid payment method `{0}` (use cash, card, or online)")]
    InvalidPaymentMethod(String),
    #[error("Invalid month: {0} (expected a number between 1 and 12)")]
    InvalidMonth(u32),
    #[error("Invalid month `{0}` (expected a number between 1 and 12)")]
    UnparsableMonth(String),
    #[error(
        "Expense ({proposed_total:.2}) exceeds total income ({income:.2}) for month {month}"
    )]
    ExpenseExceedsIncome {
        month: u32,
        proposed_total: f64,
        income: f64,
    },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
