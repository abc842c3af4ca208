use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

#[test]
fn script_mode_runs_basic_flow() {
    let home = tempdir().unwrap();
    let summary_path = home.path().join("summary.csv");
    let input = format!(
        "income 1 1000 Salary \"January pay\" card\n\
         expense 1 400 Rent Flat online\n\
         expense 3 500 Trip Beach cash\n\
         export {}\n\
         exit\n",
        summary_path.display()
    );

    let mut cmd = Command::cargo_bin("ledger_core_cli").unwrap();
    cmd.env("LEDGER_CORE_HOME", home.path())
        .env("NO_COLOR", "1")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Income added for JANUARY"))
        .stdout(contains("exceeds total income"))
        .stdout(contains("Goodbye! Total Yearly Savings: 600.00"));

    let csv = std::fs::read_to_string(&summary_path).unwrap();
    assert!(csv.starts_with("totalIncome,totalExpense,netBalance,savingsRatio,totalYearlySavings"));
    assert!(csv.contains("1000.00,400.00,600.00,0.60,600.00"));
}

#[test]
fn unknown_commands_are_reported_without_failing() {
    let home = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("ledger_core_cli").unwrap();
    cmd.env("LEDGER_CORE_HOME", home.path())
        .env("NO_COLOR", "1")
        .write_stdin("dupliates\nduplicates\n")
        .assert()
        .success()
        .stdout(contains("Suggestion: `duplicates`?"))
        .stdout(contains("No duplicate transactions found"));
}
