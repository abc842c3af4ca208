use std::{fmt, io, path::PathBuf};

use strsim::levenshtein;
use uuid::Uuid;

use crate::cli::help;
use crate::cli::output::{format_message, MessageKind};
use crate::config::Config;
use crate::core::services::{AnalyticsService, EntryRequest, ServiceError, TransactionService};
use crate::domain::month::{month_name, parse_month};
use crate::domain::record::{PaymentMethod, Record};
use crate::errors::LedgerError;
use crate::ledger::Ledger;
use crate::report::{self, report_lines};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Ledger(err) => CommandError::Core(err),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// State shared by every command of one shell session.
pub struct ShellContext<W: io::Write> {
    pub ledger: Ledger,
    pub config: Config,
    out: W,
}

impl<W: io::Write> ShellContext<W> {
    pub fn new(config: Config, out: W) -> Self {
        Self {
            ledger: Ledger::default(),
            config,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn emit(&mut self, kind: MessageKind, message: impl fmt::Display) -> io::Result<()> {
        let line = format_message(kind, message, self.config.color);
        writeln!(self.out, "{}", line)
    }

    fn print_records<'a>(&mut self, records: impl IntoIterator<Item = &'a Record>) -> io::Result<()> {
        for line in report_lines(records) {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let outcome = match command {
            "income" => self.cmd_add(args, false),
            "expense" => self.cmd_add(args, true),
            "list" => self.cmd_list(),
            "month" => self.cmd_month(args),
            "edit" => self.cmd_edit(args),
            "delete" => self.cmd_delete(args),
            "largest" => self.cmd_largest(),
            "category" => self.cmd_category(args),
            "duplicates" => self.cmd_duplicates(),
            "method" => self.cmd_method(args),
            "summary" => self.cmd_summary(),
            "export" => self.cmd_export(args),
            "version" => self.cmd_version(),
            "help" => self.cmd_help(args),
            "exit" | "quit" => self.cmd_exit(),
            _ => {
                self.suggest_command(raw)?;
                Ok(())
            }
        };
        match outcome {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn report_error(&mut self, command: &str, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.emit(MessageKind::Error, message)?;
                if let Some(usage) = help::usage(command) {
                    self.emit(MessageKind::Info, format!("Usage: {usage}"))?;
                }
                Ok(())
            }
            other => {
                self.emit(MessageKind::Error, other)?;
                Ok(())
            }
        }
    }

    pub(crate) fn print_warning(&mut self, message: &str) -> io::Result<()> {
        self.emit(MessageKind::Warning, message)
    }

    fn suggest_command(&mut self, input: &str) -> io::Result<()> {
        self.emit(
            MessageKind::Warning,
            format!("Unknown command `{input}`. Type `help` to see available commands."),
        )?;
        let needle = input.to_lowercase();
        let best = help::command_names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                self.emit(MessageKind::Info, format!("Suggestion: `{name}`?"))?;
            }
        }
        Ok(())
    }

    fn cmd_add(&mut self, args: &[&str], expense: bool) -> Result<(), CommandError> {
        let [month, amount, category, description, method] = args else {
            return Err(arg_count_error(if expense { "expense" } else { "income" }));
        };
        let entry = EntryRequest::new(
            parse_month(month)?,
            parse_amount(amount)?,
            report_field("category", category)?,
            report_field("description", description)?,
            method.parse::<PaymentMethod>()?,
        );
        let month = entry.month;
        let year = self.config.entry_year();
        let (id, label) = if expense {
            (
                TransactionService::add_expense(&mut self.ledger, year, entry)?,
                "Expense",
            )
        } else {
            (
                TransactionService::add_income(&mut self.ledger, year, entry)?,
                "Income",
            )
        };
        self.emit(
            MessageKind::Success,
            format!(
                "{label} added for {} ({id}).",
                month_name(month).unwrap_or_default()
            ),
        )?;
        Ok(())
    }

    fn cmd_list(&mut self) -> Result<(), CommandError> {
        if self.ledger.is_empty() {
            self.emit(MessageKind::Info, "No transactions yet.")?;
            return Ok(());
        }
        let records: Vec<Record> = self.ledger.all().to_vec();
        self.print_records(&records)?;
        Ok(())
    }

    fn cmd_month(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let [month] = args else {
            return Err(arg_count_error("month"));
        };
        let summary = AnalyticsService::monthly_summary(&self.ledger, parse_month(month)?);
        self.emit(
            MessageKind::Section,
            format!("Monthly Summary for {}", summary.name),
        )?;
        self.emit(
            MessageKind::Plain,
            format!("Total Income: {:.2}", summary.income),
        )?;
        self.emit(
            MessageKind::Plain,
            format!("Total Expense: {:.2}", summary.expense),
        )?;
        self.emit(
            MessageKind::Plain,
            format!("Net Balance: {:.2}", summary.net_balance),
        )?;
        Ok(())
    }

    fn cmd_edit(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let [id, amount, category, description, method] = args else {
            return Err(arg_count_error("edit"));
        };
        let id = TransactionService::parse_id(id)?;
        let updated = TransactionService::edit(
            &mut self.ledger,
            id,
            parse_amount(amount)?,
            report_field("category", category)?,
            report_field("description", description)?,
            method.parse::<PaymentMethod>()?,
        )?;
        self.report_found(id, updated, "updated")
    }

    fn cmd_delete(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let [id] = args else {
            return Err(arg_count_error("delete"));
        };
        let id = TransactionService::parse_id(id)?;
        let removed = TransactionService::remove(&mut self.ledger, id);
        self.report_found(id, removed, "deleted")
    }

    fn report_found(&mut self, id: Uuid, found: bool, verb: &str) -> Result<(), CommandError> {
        if found {
            self.emit(MessageKind::Success, format!("Transaction {id} {verb}."))?;
        } else {
            self.emit(MessageKind::Warning, format!("Transaction {id} not found."))?;
        }
        Ok(())
    }

    fn cmd_largest(&mut self) -> Result<(), CommandError> {
        let lines: Vec<String> = AnalyticsService::largest_expense_per_month(&self.ledger)
            .into_iter()
            .map(|(month, record)| {
                format!(
                    "{}: {:.2} ({})",
                    month_name(month).unwrap_or_default(),
                    record.amount(),
                    record.description()
                )
            })
            .collect();
        self.emit(MessageKind::Section, "Largest Expense Per Month")?;
        if lines.is_empty() {
            self.emit(MessageKind::Info, "No expenses recorded.")?;
        }
        for line in lines {
            self.emit(MessageKind::Plain, line)?;
        }
        Ok(())
    }

    fn cmd_category(&mut self, args: &[&str]) -> Result<(), CommandError> {
        if args.is_empty() {
            return Err(arg_count_error("category"));
        }
        let needle = args.join(" ");
        let matches: Vec<Record> = AnalyticsService::search_by_category(&self.ledger, &needle)
            .into_iter()
            .cloned()
            .collect();
        self.emit(
            MessageKind::Section,
            format!("Expenses by Category: \"{needle}\""),
        )?;
        if matches.is_empty() {
            self.emit(
                MessageKind::Info,
                format!("No expenses found for category: {needle}"),
            )?;
            return Ok(());
        }
        self.print_records(&matches)?;
        let total = AnalyticsService::category_search_total(&self.ledger, &needle);
        self.emit(
            MessageKind::Plain,
            format!("Total for Category: {total:.2}"),
        )?;
        Ok(())
    }

    fn cmd_duplicates(&mut self) -> Result<(), CommandError> {
        let groups: Vec<Vec<Record>> = self
            .ledger
            .duplicate_groups()
            .into_iter()
            .map(|group| group.into_iter().cloned().collect())
            .collect();
        self.emit(MessageKind::Section, "Duplicate Transactions")?;
        if groups.is_empty() {
            self.emit(
                MessageKind::Info,
                "No duplicate transactions found (based on amount, category, description, and type).",
            )?;
            return Ok(());
        }
        for group in &groups {
            self.emit(MessageKind::Plain, "DUPLICATE SET:")?;
            self.print_records(group)?;
        }
        Ok(())
    }

    fn cmd_method(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let [method] = args else {
            return Err(arg_count_error("method"));
        };
        let method = method.parse::<PaymentMethod>()?.as_str();
        let matches: Vec<Record> = AnalyticsService::search_by_payment_method(&self.ledger, method)
            .into_iter()
            .cloned()
            .collect();
        self.emit(
            MessageKind::Section,
            format!("Transactions by Payment Method: \"{method}\""),
        )?;
        if matches.is_empty() {
            self.emit(
                MessageKind::Info,
                format!("No transactions found for payment method: {method}"),
            )?;
            return Ok(());
        }
        self.print_records(&matches)?;
        let totals = AnalyticsService::payment_method_totals(&self.ledger, method);
        self.emit(
            MessageKind::Plain,
            format!("Total Income via {method}: {:.2}", totals.income),
        )?;
        self.emit(
            MessageKind::Plain,
            format!("Total Expense via {method}: {:.2}", totals.expense),
        )?;
        Ok(())
    }

    fn cmd_summary(&mut self) -> Result<(), CommandError> {
        let summary = AnalyticsService::overall_summary(&self.ledger);
        self.emit(MessageKind::Section, "Overall Financial Summary")?;
        self.emit(
            MessageKind::Plain,
            format!("Total Income: {:.2}", summary.total_income),
        )?;
        self.emit(
            MessageKind::Plain,
            format!("Total Expense: {:.2}", summary.total_expense),
        )?;
        self.emit(
            MessageKind::Plain,
            format!("Net Balance (Income - Expense): {:.2}", summary.net_balance),
        )?;
        self.emit(
            MessageKind::Plain,
            format!(
                "Savings Ratio: {:.2}% (Ratio: {:.4})",
                summary.savings_ratio * 100.0,
                summary.savings_ratio
            ),
        )?;
        self.emit(
            MessageKind::Plain,
            format!(
                "Total Year-to-Date Savings (positive monthly balances): {:.2}",
                summary.total_yearly_savings
            ),
        )?;
        Ok(())
    }

    fn cmd_export(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let path = match args {
            [] => PathBuf::from(&self.config.summary_file),
            [path] => PathBuf::from(path),
            _ => return Err(arg_count_error("export")),
        };
        let summary = AnalyticsService::overall_summary(&self.ledger);
        report::write_summary_file(&path, &summary, self.config.precision)?;
        self.emit(
            MessageKind::Success,
            format!("Monthly summary written to {}", path.display()),
        )?;
        Ok(())
    }

    fn cmd_version(&mut self) -> Result<(), CommandError> {
        self.emit(
            MessageKind::Plain,
            format!(
                "ledger_core {} ({} {}, {} {}, built {})",
                env!("CARGO_PKG_VERSION"),
                env!("LEDGER_CORE_BUILD_HASH"),
                env!("LEDGER_CORE_BUILD_STATUS"),
                env!("LEDGER_CORE_BUILD_TARGET"),
                env!("LEDGER_CORE_BUILD_PROFILE"),
                env!("LEDGER_CORE_BUILD_TIMESTAMP"),
            ),
        )?;
        Ok(())
    }

    fn cmd_help(&mut self, args: &[&str]) -> Result<(), CommandError> {
        if let [command] = args {
            match help::usage(&command.to_lowercase()) {
                Some(usage) => self.emit(MessageKind::Plain, format!("Usage: {usage}"))?,
                None => self.suggest_command(command)?,
            }
            return Ok(());
        }
        self.emit(MessageKind::Section, "Commands")?;
        for line in help::help_lines() {
            self.emit(MessageKind::Plain, line)?;
        }
        self.emit(
            MessageKind::Plain,
            "Quote arguments that contain spaces, e.g. expense 3 12.5 Food \"Team lunch\" card",
        )?;
        Ok(())
    }

    fn cmd_exit(&mut self) -> Result<(), CommandError> {
        let savings = AnalyticsService::total_yearly_savings(&self.ledger);
        self.emit(
            MessageKind::Plain,
            format!("Goodbye! Total Yearly Savings: {savings:.2}"),
        )?;
        Err(CommandError::ExitRequested)
    }
}

fn arg_count_error(command: &str) -> CommandError {
    CommandError::InvalidArguments(format!("wrong number of arguments for `{command}`"))
}

/// Report lines are comma separated without escaping, so free text may not contain commas.
fn report_field<'a>(field: &str, value: &'a str) -> Result<&'a str, CommandError> {
    if value.contains(',') {
        return Err(CommandError::InvalidArguments(format!(
            "{field} `{value}` must not contain commas"
        )));
    }
    Ok(value)
}

pub(crate) fn parse_amount(input: &str) -> Result<f64, CommandError> {
    input.trim().parse::<f64>().map_err(|_| {
        CommandError::InvalidArguments(format!("invalid amount `{input}` (use a number)"))
    })
}
