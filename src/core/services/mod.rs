pub mod analytics_service;
pub mod transaction_service;

pub use analytics_service::AnalyticsService;
pub use transaction_service::{EntryRequest, TransactionService};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}
