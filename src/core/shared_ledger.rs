use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::core::services::{EntryRequest, ServiceResult, TransactionService};
use crate::domain::record::{PaymentMethod, RecordKind};
use crate::errors::LedgerError;
use crate::ledger::Ledger;

/// Thread-safe handle that serializes every mutation of a [`Ledger`].
///
/// Mutations take the write lock; analytics and duplicate detection run under
/// the read lock and may overlap with each other but never with a mutation.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    // Ledger operations validate before mutating, so state behind a poisoned
    // lock is still consistent.
    fn read_guard(&self) -> RwLockReadGuard<'_, Ledger> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the ledger under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        f(&self.read_guard())
    }

    /// Runs `f` against the ledger under the write lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut Ledger) -> R) -> R {
        f(&mut self.write_guard())
    }

    pub fn add(
        &self,
        amount: f64,
        category: &str,
        description: &str,
        payment_method: PaymentMethod,
        kind: RecordKind,
        date: chrono::NaiveDate,
    ) -> Result<Uuid, LedgerError> {
        self.write_guard()
            .add(amount, category, description, payment_method, kind, date)
    }

    pub fn edit(
        &self,
        id: Uuid,
        amount: f64,
        category: &str,
        description: &str,
        payment_method: PaymentMethod,
    ) -> Result<bool, LedgerError> {
        self.write_guard()
            .edit(id, amount, category, description, payment_method)
    }

    pub fn delete(&self, id: Uuid) -> bool {
        self.write_guard().delete(id)
    }

    pub fn add_income(&self, year: i32, entry: EntryRequest) -> ServiceResult<Uuid> {
        TransactionService::add_income(&mut self.write_guard(), year, entry)
    }

    /// Checks the monthly income policy and records the expense atomically.
    pub fn add_expense_checked(&self, year: i32, entry: EntryRequest) -> ServiceResult<Uuid> {
        TransactionService::add_expense(&mut self.write_guard(), year, entry)
    }

    /// Ids of every duplicate group, taken under the read lock.
    pub fn duplicate_ids(&self) -> Vec<Vec<Uuid>> {
        self.read(|ledger| {
            ledger
                .duplicate_groups()
                .into_iter()
                .map(|group| group.into_iter().map(|record| record.id()).collect())
                .collect()
        })
    }

    /// Point-in-time copy of the ledger.
    pub fn snapshot(&self) -> Ledger {
        self.read(Ledger::clone)
    }
}
