//! Validated entry path for adding, editing, and removing ledger records.

use uuid::Uuid;

use crate::core::services::{AnalyticsService, ServiceError, ServiceResult};
use crate::domain::month::{first_of_month, month_name, validate_month};
use crate::domain::record::{validate_amount, PaymentMethod, RecordKind};
use crate::errors::LedgerError;
use crate::ledger::Ledger;

/// A month-based entry as collected from a user.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRequest {
    pub month: u32,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub payment_method: PaymentMethod,
}

impl EntryRequest {
    pub fn new(
        month: u32,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            month,
            amount,
            category: category.into(),
            description: description.into(),
            payment_method,
        }
    }
}

/// Provides validated CRUD helpers for ledger records.
pub struct TransactionService;

impl TransactionService {
    /// Adds an income dated the 1st of the requested month in `year`.
    pub fn add_income(ledger: &mut Ledger, year: i32, entry: EntryRequest) -> ServiceResult<Uuid> {
        Self::add_entry(ledger, year, entry, RecordKind::Income)
    }

    /// Adds an expense after checking it against that month's income.
    pub fn add_expense(
        ledger: &mut Ledger,
        year: i32,
        entry: EntryRequest,
    ) -> ServiceResult<Uuid> {
        validate_month(entry.month)?;
        validate_amount(entry.amount)?;
        Self::check_expense(ledger, entry.month, entry.amount)?;
        Self::add_entry(ledger, year, entry, RecordKind::Expense)
    }

    /// Rejects an expense that would push the month's expenses above its income.
    ///
    /// Must be evaluated before the expense is recorded; spending exactly the
    /// month's income is allowed.
    pub fn check_expense(ledger: &Ledger, month: u32, amount: f64) -> ServiceResult<()> {
        let income = AnalyticsService::monthly_income(ledger, month);
        let proposed_total = AnalyticsService::monthly_expense(ledger, month) + amount;
        if proposed_total > income {
            tracing::warn!(
                month,
                proposed_total,
                income,
                "expense rejected: exceeds monthly income"
            );
            return Err(LedgerError::ExpenseExceedsIncome {
                month,
                proposed_total,
                income,
            }
            .into());
        }
        Ok(())
    }

    /// Updates the record identified by `id`; `Ok(false)` when it does not exist.
    pub fn edit(
        ledger: &mut Ledger,
        id: Uuid,
        amount: f64,
        category: &str,
        description: &str,
        payment_method: PaymentMethod,
    ) -> ServiceResult<bool> {
        ledger
            .edit(id, amount, category, description, payment_method)
            .map_err(ServiceError::from)
    }

    pub fn remove(ledger: &mut Ledger, id: Uuid) -> bool {
        ledger.delete(id)
    }

    /// Parses a user-supplied record id.
    pub fn parse_id(input: &str) -> ServiceResult<Uuid> {
        Uuid::parse_str(input.trim())
            .map_err(|_| ServiceError::Invalid(format!("`{}` is not a valid record id", input)))
    }

    fn add_entry(
        ledger: &mut Ledger,
        year: i32,
        entry: EntryRequest,
        kind: RecordKind,
    ) -> ServiceResult<Uuid> {
        let date = first_of_month(year, entry.month)?;
        let id = ledger.add(
            entry.amount,
            entry.category,
            entry.description,
            entry.payment_method,
            kind,
            date,
        )?;
        tracing::info!(
            %id,
            %kind,
            month = month_name(entry.month).unwrap_or_default(),
            "entry recorded"
        );
        Ok(id)
    }
}
