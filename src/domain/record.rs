//! Domain model for a single income or expense entry.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::common::Displayable;
use crate::errors::LedgerError;

/// Distinguishes money coming in from money going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    pub fn is_income(self) -> bool {
        matches!(self, RecordKind::Income)
    }

    /// Upper-case label used in report lines.
    pub fn report_label(self) -> &'static str {
        match self {
            RecordKind::Income => "INCOME",
            RecordKind::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Income => "Income",
            RecordKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Closed set of accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Cash,
    Card,
    Online,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] =
        [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Online];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Online => "online",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = LedgerError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_lowercase();
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == normalized)
            .ok_or_else(|| LedgerError::InvalidPaymentMethod(input.trim().to_string()))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded income or expense.
///
/// Records are created, edited, and removed exclusively through
/// [`Ledger`](crate::ledger::Ledger); outside the crate they are read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub(crate) id: Uuid,
    pub(crate) date: NaiveDate,
    pub(crate) amount: f64,
    pub(crate) category: String,
    pub(crate) description: String,
    pub(crate) payment_method: PaymentMethod,
    pub(crate) kind: RecordKind,
}

impl Record {
    pub(crate) fn new(
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
        payment_method: PaymentMethod,
        kind: RecordKind,
        date: NaiveDate,
    ) -> Result<Self, LedgerError> {
        validate_amount(amount)?;
        Ok(Self {
            id: Uuid::new_v4(),
            date,
            amount,
            category: category.into(),
            description: description.into(),
            payment_method,
            kind,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    pub fn month(&self) -> u32 {
        crate::domain::month::month_of(self.date)
    }

    /// Content key under which two records count as duplicates of each other.
    pub fn duplicate_key(&self) -> DuplicateKey {
        DuplicateKey {
            amount_bits: self.amount.to_bits(),
            category: self.category.to_lowercase(),
            description: self.description.to_lowercase(),
            kind: self.kind,
        }
    }

    pub fn is_duplicate_of(&self, other: &Record) -> bool {
        self.duplicate_key() == other.duplicate_key()
    }
}

impl Displayable for Record {
    fn display_label(&self) -> String {
        format!(
            "{} {:.2} [{}] {}",
            self.kind, self.amount, self.category, self.description
        )
    }
}

/// Grouping key for duplicate detection.
///
/// Compares amount exactly, category and description case-insensitively, and
/// kind. Identity, date, and payment method are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey {
    amount_bits: u64,
    category: String,
    description: String,
    kind: RecordKind,
}

/// Amounts must be finite and strictly positive.
pub fn validate_amount(amount: f64) -> Result<f64, LedgerError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(LedgerError::InvalidAmount(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn payment_method_parses_case_insensitively() {
        assert_eq!("CaSh".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!(" online ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Online);
        let err = "cheque".parse::<PaymentMethod>().unwrap_err();
        assert!(matches!(err, LedgerError::InvalidPaymentMethod(ref m) if m == "cheque"));
    }

    #[test]
    fn rejects_non_positive_amounts() {
        for amount in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = Record::new(
                amount,
                "Food",
                "Lunch",
                PaymentMethod::Cash,
                RecordKind::Expense,
                date(),
            );
            assert!(matches!(result, Err(LedgerError::InvalidAmount(_))));
        }
    }

    #[test]
    fn duplicate_key_ignores_case_date_and_method() {
        let a = Record::new(
            50.0,
            "Food",
            "Lunch",
            PaymentMethod::Cash,
            RecordKind::Expense,
            date(),
        )
        .unwrap();
        let b = Record::new(
            50.0,
            "FOOD",
            "lunch",
            PaymentMethod::Card,
            RecordKind::Expense,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
        .unwrap();
        assert_ne!(a.id(), b.id());
        assert!(a.is_duplicate_of(&b));
        assert!(b.is_duplicate_of(&a));
    }

    #[test]
    fn duplicate_key_respects_kind_and_amount() {
        let expense = Record::new(
            50.0,
            "Food",
            "Lunch",
            PaymentMethod::Cash,
            RecordKind::Expense,
            date(),
        )
        .unwrap();
        let income = Record::new(
            50.0,
            "Food",
            "Lunch",
            PaymentMethod::Cash,
            RecordKind::Income,
            date(),
        )
        .unwrap();
        let pricier = Record::new(
            50.5,
            "Food",
            "Lunch",
            PaymentMethod::Cash,
            RecordKind::Expense,
            date(),
        )
        .unwrap();
        assert!(!expense.is_duplicate_of(&income));
        assert!(!expense.is_duplicate_of(&pricier));
    }

    #[test]
    fn display_label_summarizes_record() {
        let record = Record::new(
            12.5,
            "Food",
            "Lunch",
            PaymentMethod::Card,
            RecordKind::Expense,
            date(),
        )
        .unwrap();
        assert_eq!(record.display_label(), "Expense 12.50 [Food] Lunch");
    }
}
