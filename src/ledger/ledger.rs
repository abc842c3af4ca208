use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::common::Displayable;
use crate::domain::record::{validate_amount, DuplicateKey, PaymentMethod, Record, RecordKind};
use crate::errors::LedgerError;

/// Owning collection of income and expense records.
///
/// The ledger is the only place records are created, edited, or removed.
/// Every rejected operation leaves the collection untouched.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<Record>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new record and returns its freshly generated id.
    pub fn add(
        &mut self,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
        payment_method: PaymentMethod,
        kind: RecordKind,
        date: NaiveDate,
    ) -> Result<Uuid, LedgerError> {
        let record = Record::new(amount, category, description, payment_method, kind, date)?;
        let id = record.id;
        tracing::debug!(%id, %kind, amount, %date, "record added");
        self.records.push(record);
        Ok(id)
    }

    /// Replaces the editable fields of the record identified by `id`.
    ///
    /// Returns `Ok(false)` when no such record exists. Kind, id, and date are
    /// never changed.
    pub fn edit(
        &mut self,
        id: Uuid,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
        payment_method: PaymentMethod,
    ) -> Result<bool, LedgerError> {
        validate_amount(amount)?;
        let Some(record) = self.records.iter_mut().find(|record| record.id == id) else {
            tracing::debug!(%id, "edit skipped: record not found");
            return Ok(false);
        };
        record.amount = amount;
        record.category = category.into();
        record.description = description.into();
        record.payment_method = payment_method;
        tracing::debug!(%id, amount, "record updated");
        Ok(true)
    }

    /// Removes the record identified by `id`, reporting whether one was removed.
    pub fn delete(&mut self, id: Uuid) -> bool {
        match self.records.iter().position(|record| record.id == id) {
            Some(index) => {
                let removed = self.records.remove(index);
                tracing::debug!(%id, record = %removed.display_label(), "record deleted");
                        true
            }
            None => {
                tracing::debug!(%id, "delete skipped: record not found");
                false
            }
        }
    }

    pub fn find(&self, id: Uuid) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Groups of two or more records sharing the same [`DuplicateKey`].
    ///
    /// Members keep insertion order; groups are ordered by their first member.
    pub fn duplicate_groups(&self) -> Vec<Vec<&Record>> {
        let mut slots: HashMap<DuplicateKey, usize> = HashMap::new();
        let mut groups: Vec<Vec<&Record>> = Vec::new();
        for record in &self.records {
            let slot = *slots.entry(record.duplicate_key()).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(record);
        }
        groups.retain(|group| group.len() > 1);
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn lunch(ledger: &mut Ledger, method: PaymentMethod) -> Uuid {
        ledger
            .add(50.0, "Food", "Lunch", method, RecordKind::Expense, jan())
            .unwrap()
    }

    #[test]
    fn new_ledger_starts_empty() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert!(ledger.duplicate_groups().is_empty());
    }

    #[test]
    fn add_then_find_returns_submitted_fields() {
        let mut ledger = Ledger::new();
        let id = ledger
            .add(
                1000.0,
                "Salary",
                "January pay",
                PaymentMethod::Online,
                RecordKind::Income,
                jan(),
            )
            .unwrap();
        let record = ledger.find(id).expect("record present");
        assert_eq!(record.amount(), 1000.0);
        assert_eq!(record.category(), "Salary");
        assert_eq!(record.description(), "January pay");
        assert_eq!(record.payment_method(), PaymentMethod::Online);
        assert_eq!(record.kind(), RecordKind::Income);
        assert_eq!(record.date(), jan());
    }

    #[test]
    fn add_rejects_invalid_amount_without_mutation() {
        let mut ledger = Ledger::new();
        let err = ledger
            .add(0.0, "Food", "Lunch", PaymentMethod::Cash, RecordKind::Expense, jan())
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn edit_with_invalid_amount_leaves_record_unchanged() {
        let mut ledger = Ledger::new();
        let id = lunch(&mut ledger, PaymentMethod::Cash);
        let before = ledger.find(id).cloned().unwrap();

        let err = ledger
            .edit(id, -5.0, "Other", "Changed", PaymentMethod::Card)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        assert_eq!(ledger.find(id), Some(&before));
    }

    #[test]
    fn edit_updates_mutable_fields_only() {
        let mut ledger = Ledger::new();
        let id = lunch(&mut ledger, PaymentMethod::Cash);
        assert!(ledger
            .edit(id, 75.0, "Dining", "Dinner", PaymentMethod::Card)
            .unwrap());
        let record = ledger.find(id).unwrap();
        assert_eq!(record.amount(), 75.0);
        assert_eq!(record.category(), "Dining");
        assert_eq!(record.description(), "Dinner");
        assert_eq!(record.payment_method(), PaymentMethod::Card);
        assert_eq!(record.kind(), RecordKind::Expense);
        assert_eq!(record.date(), jan());
    }

    #[test]
    fn edit_unknown_id_reports_not_found() {
        let mut ledger = Ledger::new();
        let updated = ledger
            .edit(Uuid::new_v4(), 10.0, "Food", "Lunch", PaymentMethod::Cash)
            .unwrap();
        assert!(!updated);
    }

    #[test]
    fn delete_twice_reports_not_found() {
        let mut ledger = Ledger::new();
        let id = lunch(&mut ledger, PaymentMethod::Cash);
        assert!(ledger.delete(id));
        assert!(ledger.find(id).is_none());
        assert!(!ledger.delete(id));
    }

    #[test]
    fn duplicate_groups_ignore_payment_method() {
        let mut ledger = Ledger::new();
        let first = lunch(&mut ledger, PaymentMethod::Cash);
        let second = lunch(&mut ledger, PaymentMethod::Card);
        ledger
            .add(12.0, "Transport", "Bus", PaymentMethod::Cash, RecordKind::Expense, jan())
            .unwrap();

        let groups = ledger.duplicate_groups();
        assert_eq!(groups.len(), 1);
        let ids: Vec<Uuid> = groups[0].iter().map(|record| record.id()).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut ledger = Ledger::new();
        let a = lunch(&mut ledger, PaymentMethod::Cash);
        let b = lunch(&mut ledger, PaymentMethod::Online);
        let ids: Vec<Uuid> = ledger.all().iter().map(Record::id).collect();
        assert_eq!(ids, vec![a, b]);
    }
}
