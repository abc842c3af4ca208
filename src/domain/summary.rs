//! Value types produced by ledger analytics.

/// Income, expense, and net balance for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub month: u32,
    pub name: &'static str,
    pub income: f64,
    pub expense: f64,
    pub net_balance: f64,
}

/// Ledger-wide totals, the row written to the summary CSV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_balance: f64,
    pub savings_ratio: f64,
    pub total_yearly_savings: f64,
}

/// Income and expense totals over a filtered set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlowTotals {
    pub income: f64,
    pub expense: f64,
}
