//! Calendar month identifiers used to bucket ledger entries.

use chrono::{Datelike, NaiveDate};

use crate::errors::LedgerError;

const MONTH_NAMES: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

/// Every month number, in calendar order.
pub const MONTHS: std::ops::RangeInclusive<u32> = 1..=12;

/// Returns the upper-case calendar name for `month`, or `None` outside 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    if MONTHS.contains(&month) {
        Some(MONTH_NAMES[(month - 1) as usize])
    } else {
        None
    }
}

/// Validates a month number supplied by a caller.
pub fn validate_month(month: u32) -> Result<u32, LedgerError> {
    if MONTHS.contains(&month) {
        Ok(month)
    } else {
        Err(LedgerError::InvalidMonth(month))
    }
}

/// Parses textual month input (`"3"`, `" 12 "`) into a validated month number.
pub fn parse_month(input: &str) -> Result<u32, LedgerError> {
    let trimmed = input.trim();
    let month = trimmed
        .parse::<u32>()
        .map_err(|_| LedgerError::UnparsableMonth(trimmed.to_string()))?;
    validate_month(month)
}

/// First day of `month` in `year`, the canonical date for month-based entries.
pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, LedgerError> {
    let month = validate_month(month)?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(LedgerError::InvalidMonth(month))
}

/// Month number (1..=12) of `date`.
pub fn month_of(date: NaiveDate) -> u32 {
    date.month()
}
