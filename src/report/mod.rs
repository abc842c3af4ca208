//! Flat text renderings of records and summaries.
//!
//! Report lines are comma-joined without escaping; free-text fields that
//! contain commas will produce ambiguous lines.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::domain::record::Record;
use crate::domain::summary::Summary;
use crate::errors::LedgerError;

pub const REPORT_HEADER: &str = "ID,DATE,TYPE,CATEGORY,AMOUNT,DESCRIPTION,PAYMENT_METHOD";
pub const SUMMARY_HEADER: &str =
    "totalIncome,totalExpense,netBalance,savingsRatio,totalYearlySavings";

/// `id,date,INCOME|EXPENSE,category,amount,description,payment_method`
pub fn report_line(record: &Record) -> String {
    [
        record.id().to_string(),
        record.date().format("%Y-%m-%d").to_string(),
        record.kind().report_label().to_string(),
        record.category().to_string(),
        format_amount(record.amount()),
        record.description().to_string(),
        record.payment_method().as_str().to_string(),
    ]
    .join(",")
}

/// Header followed by one report line per record.
pub fn report_lines<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<String> {
    std::iter::once(REPORT_HEADER.to_string())
        .chain(records.into_iter().map(report_line))
        .collect()
}

/// Plain amount rendering that always keeps at least one decimal (`1000.0`).
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.1}", amount)
    } else {
        amount.to_string()
    }
}

impl Summary {
    pub fn csv_header() -> &'static str {
        SUMMARY_HEADER
    }

    pub fn to_csv_row(&self, precision: usize) -> String {
        [
            self.total_income,
            self.total_expense,
            self.net_balance,
            self.savings_ratio,
            self.total_yearly_savings,
        ]
        .iter()
        .map(|value| format!("{:.*}", precision, value))
        .collect::<Vec<_>>()
        .join(",")
    }
}

pub fn write_summary_csv<W: Write>(
    writer: &mut W,
    summary: &Summary,
    precision: usize,
) -> io::Result<()> {
    writeln!(writer, "{}", Summary::csv_header())?;
    writeln!(writer, "{}", summary.to_csv_row(precision))?;
    writer.flush()
}

pub fn write_summary_file(
    path: &Path,
    summary: &Summary,
    precision: usize,
) -> Result<(), LedgerError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_summary_csv(&mut writer, summary, precision)?;
    tracing::info!(path = %path.display(), "summary written");
    Ok(())
}
