//! Aggregations derived on demand from the ledger's current records.
//!
//! Nothing here is cached: every call rescans the ledger, so results always
//! reflect the latest adds, edits, and deletes.

use std::collections::BTreeMap;

use crate::domain::month::{month_name, MONTHS};
use crate::domain::record::{Record, RecordKind};
use crate::domain::summary::{FlowTotals, MonthlySummary, Summary};
use crate::ledger::Ledger;

pub struct AnalyticsService;

impl AnalyticsService {
    pub fn total_income(ledger: &Ledger) -> f64 {
        sum_where(ledger, |record| record.kind() == RecordKind::Income)
    }

    pub fn total_expense(ledger: &Ledger) -> f64 {
        sum_where(ledger, |record| record.kind() == RecordKind::Expense)
    }

    /// Income booked in `month` (1..=12). The month is assumed to be validated.
    pub fn monthly_income(ledger: &Ledger, month: u32) -> f64 {
        sum_where(ledger, |record| {
            record.kind() == RecordKind::Income && record.month() == month
        })
    }

    /// Expenses booked in `month` (1..=12). The month is assumed to be validated.
    pub fn monthly_expense(ledger: &Ledger, month: u32) -> f64 {
        sum_where(ledger, |record| {
            record.kind() == RecordKind::Expense && record.month() == month
        })
    }

    pub fn monthly_net_balance(ledger: &Ledger, month: u32) -> f64 {
        Self::monthly_income(ledger, month) - Self::monthly_expense(ledger, month)
    }

    /// Sum of positive monthly net balances; months in deficit contribute nothing.
    pub fn total_yearly_savings(ledger: &Ledger) -> f64 {
        MONTHS
            .map(|month| Self::monthly_net_balance(ledger, month).max(0.0))
            .fold(0.0, |total, net| total + net)
    }

    /// Share of income left after expenses, `0.0` when there is no income.
    pub fn savings_ratio(ledger: &Ledger) -> f64 {
        let income = Self::total_income(ledger);
        if income > 0.0 {
            (income - Self::total_expense(ledger)) / income
        } else {
            0.0
        }
    }

    /// The largest expense of each month that has any expenses.
    ///
    /// On equal amounts the earliest inserted record wins.
    pub fn largest_expense_per_month(ledger: &Ledger) -> BTreeMap<u32, &Record> {
        let mut largest: BTreeMap<u32, &Record> = BTreeMap::new();
        for record in ledger
            .all()
            .iter()
            .filter(|record| record.kind() == RecordKind::Expense)
        {
            largest
                .entry(record.month())
                .and_modify(|current| {
                    if record.amount() > current.amount() {
                        *current = record;
                    }
                })
                .or_insert(record);
        }
        largest
    }

    /// Expenses whose category contains `needle`, ignoring case.
    pub fn search_by_category<'a>(ledger: &'a Ledger, needle: &str) -> Vec<&'a Record> {
        let needle = needle.trim().to_lowercase();
        ledger
            .all()
            .iter()
            .filter(|record| record.kind() == RecordKind::Expense)
            .filter(|record| record.category().trim().to_lowercase().contains(&needle))
            .collect()
    }

    /// Records of either kind paid with exactly `method`, ignoring case.
    pub fn search_by_payment_method<'a>(ledger: &'a Ledger, method: &str) -> Vec<&'a Record> {
        let method = method.trim().to_lowercase();
        ledger
            .all()
            .iter()
            .filter(|record| record.payment_method().as_str() == method)
            .collect()
    }

    pub fn category_search_total(ledger: &Ledger, needle: &str) -> f64 {
        Self::search_by_category(ledger, needle)
            .iter()
            .map(|record| record.amount())
            .fold(0.0, |total, amount| total + amount)
    }

    /// Income and expense totals for records paid with `method`.
    pub fn payment_method_totals(ledger: &Ledger, method: &str) -> FlowTotals {
        flow_totals(Self::search_by_payment_method(ledger, method))
    }

    pub fn monthly_summary(ledger: &Ledger, month: u32) -> MonthlySummary {
        let income = Self::monthly_income(ledger, month);
        let expense = Self::monthly_expense(ledger, month);
        MonthlySummary {
            month,
            name: month_name(month).unwrap_or("INVALID"),
            income,
            expense,
            net_balance: income - expense,
        }
    }

    pub fn overall_summary(ledger: &Ledger) -> Summary {
        let total_income = Self::total_income(ledger);
        let total_expense = Self::total_expense(ledger);
        Summary {
            total_income,
            total_expense,
            net_balance: total_income - total_expense,
            savings_ratio: Self::savings_ratio(ledger),
            total_yearly_savings: Self::total_yearly_savings(ledger),
        }
    }
}

/// Folds from `0.0`; an empty `f64` sum yields `-0.0`, which renders as `-0.00`.
fn sum_where<F>(ledger: &Ledger, predicate: F) -> f64
where
    F: Fn(&Record) -> bool,
{
    ledger
        .all()
        .iter()
        .filter(|record| predicate(record))
        .map(Record::amount)
        .fold(0.0, |total, amount| total + amount)
}

fn flow_totals<'a>(records: impl IntoIterator<Item = &'a Record>) -> FlowTotals {
    records
        .into_iter()
        .fold(FlowTotals::default(), |mut totals, record| {
            match record.kind() {
                RecordKind::Income => totals.income += record.amount(),
                RecordKind::Expense => totals.expense += record.amount(),
            }
            totals
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::PaymentMethod;
    use chrono::NaiveDate;

    fn day(month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, 1).unwrap()
    }

    fn add(
        ledger: &mut Ledger,
        kind: RecordKind,
        month: u32,
        amount: f64,
        category: &str,
    ) -> uuid::Uuid {
        ledger
            .add(amount, category, "entry", PaymentMethod::Cash, kind, day(month))
            .unwrap()
    }

    #[test]
    fn salary_and_rent_scenario() {
        let mut ledger = Ledger::new();
        add(&mut ledger, RecordKind::Income, 1, 1000.0, "Salary");
        add(&mut ledger, RecordKind::Expense, 1, 400.0, "Rent");

        assert_eq!(AnalyticsService::monthly_net_balance(&ledger, 1), 600.0);
        assert_eq!(AnalyticsService::total_yearly_savings(&ledger), 600.0);
        assert_eq!(AnalyticsService::savings_ratio(&ledger), 0.6);
    }

    #[test]
    fn savings_ratio_is_zero_without_income() {
        let mut ledger = Ledger::new();
        assert_eq!(AnalyticsService::savings_ratio(&ledger), 0.0);
        add(&mut ledger, RecordKind::Expense, 2, 80.0, "Food");
        assert_eq!(AnalyticsService::savings_ratio(&ledger), 0.0);
    }

    #[test]
    fn deficit_months_are_excluded_from_yearly_savings() {
        let mut ledger = Ledger::new();
        add(&mut ledger, RecordKind::Income, 1, 500.0, "Salary");
        add(&mut ledger, RecordKind::Expense, 1, 100.0, "Food");
        add(&mut ledger, RecordKind::Expense, 2, 300.0, "Rent");

        assert_eq!(AnalyticsService::monthly_net_balance(&ledger, 2), -300.0);
        assert_eq!(AnalyticsService::total_yearly_savings(&ledger), 400.0);
    }

    #[test]
    fn largest_expense_prefers_first_on_ties() {
        let mut ledger = Ledger::new();
        add(&mut ledger, RecordKind::Expense, 2, 10.0, "A");
        let first_thirty = add(&mut ledger, RecordKind::Expense, 2, 30.0, "B");
        add(&mut ledger, RecordKind::Expense, 2, 30.0, "C");
        add(&mut ledger, RecordKind::Income, 5, 900.0, "Salary");

        let largest = AnalyticsService::largest_expense_per_month(&ledger);
        assert_eq!(largest.len(), 1);
        assert_eq!(largest[&2].id(), first_thirty);
        assert!(!largest.contains_key(&5));
    }

    #[test]
    fn category_search_matches_substrings_of_expenses_only() {
        let mut ledger = Ledger::new();
        add(&mut ledger, RecordKind::Expense, 1, 20.0, "Groceries");
        add(&mut ledger, RecordKind::Expense, 1, 15.0, "grocery run");
        add(&mut ledger, RecordKind::Income, 1, 50.0, "Grocery refund");

        let found = AnalyticsService::search_by_category(&ledger, "GROCER");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|record| !record.is_income()));
        assert_eq!(AnalyticsService::category_search_total(&ledger, "grocer"), 35.0);
    }

    #[test]
    fn payment_method_search_is_exact_and_spans_kinds() {
        let mut ledger = Ledger::new();
        ledger
            .add(100.0, "Gift", "Birthday", PaymentMethod::Cash, RecordKind::Income, day(3))
            .unwrap();
        ledger
            .add(40.0, "Food", "Market", PaymentMethod::Cash, RecordKind::Expense, day(3))
            .unwrap();
        ledger
            .add(60.0, "Tech", "Cable", PaymentMethod::Online, RecordKind::Expense, day(3))
            .unwrap();

        assert_eq!(AnalyticsService::search_by_payment_method(&ledger, "CASH").len(), 2);
        assert!(AnalyticsService::search_by_payment_method(&ledger, "ca").is_empty());

        let totals = AnalyticsService::payment_method_totals(&ledger, "cash");
        assert_eq!(totals.income, 100.0);
        assert_eq!(totals.expense, 40.0);
    }

    #[test]
    fn empty_ledger_totals_are_positive_zero() {
        let ledger = Ledger::new();
        for total in [
            AnalyticsService::total_income(&ledger),
            AnalyticsService::total_expense(&ledger),
            AnalyticsService::monthly_income(&ledger, 4),
            AnalyticsService::monthly_expense(&ledger, 4),
            AnalyticsService::category_search_total(&ledger, "food"),
        ] {
            assert!(total == 0.0 && total.is_sign_positive());
        }
        let row = AnalyticsService::overall_summary(&ledger).to_csv_row(2);
        assert_eq!(row, "0.00,0.00,0.00,0.00,0.00");
    }

    #[test]
    fn overall_summary_collects_totals() {
        let mut ledger = Ledger::new();
        add(&mut ledger, RecordKind::Income, 1, 1000.0, "Salary");
        add(&mut ledger, RecordKind::Expense, 1, 400.0, "Rent");

        let summary = AnalyticsService::overall_summary(&ledger);
        assert_eq!(summary.total_income, 1000.0);
        assert_eq!(summary.total_expense, 400.0);
        assert_eq!(summary.net_balance, 600.0);
        assert_eq!(summary.savings_ratio, 0.6);
        assert_eq!(summary.total_yearly_savings, 600.0);

        let january = AnalyticsService::monthly_summary(&ledger, 1);
        assert_eq!(january.name, "JANUARY");
        assert_eq!(january.net_balance, 600.0);
    }
}
