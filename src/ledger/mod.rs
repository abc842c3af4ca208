//! The record-owning ledger aggregate.

#[allow(clippy::module_inception)]
pub mod ledger;

pub use ledger::Ledger;
