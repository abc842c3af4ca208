pub mod services;
pub mod shared_ledger;

pub use shared_ledger::SharedLedger;
