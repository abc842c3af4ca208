#![doc(test(attr(deny(warnings))))]

//! Ledger Core records income and expense entries and derives monthly and
//! yearly analytics from them.
//!
//! ```
//! use chrono::NaiveDate;
//! use ledger_core::core::services::AnalyticsService;
//! use ledger_core::domain::{PaymentMethod, RecordKind};
//! use ledger_core::ledger::Ledger;
//!
//! let mut ledger = Ledger::new();
//! let january = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! ledger
//!     .add(1000.0, "Salary", "Pay", PaymentMethod::Card, RecordKind::Income, january)
//!     .unwrap();
//! ledger
//!     .add(400.0, "Rent", "Flat", PaymentMethod::Online, RecordKind::Expense, january)
//!     .unwrap();
//! assert_eq!(AnalyticsService::monthly_net_balance(&ledger, 1), 600.0);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod report;
pub mod utils;

pub use errors::{LedgerError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
