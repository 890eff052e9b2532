use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn cli(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("expense_core_cli").unwrap();
    cmd.env("EXPENSE_CORE_CLI_SCRIPT", "1")
        .env("EXPENSE_CORE_DATA_DIR", data_dir);
    cmd
}

#[test]
fn summary_reports_week_totals_and_highlights() {
    let temp = tempdir().unwrap();
    cli(temp.path())
        .write_stdin("summary\nexit\n")
        .assert()
        .success()
        .stdout(contains("Week of"))
        .stdout(contains("Total spent:"))
        .stdout(contains("Highest:"))
        .stdout(contains("Lowest:"))
        .stdout(contains("By category:"))
        .stdout(contains("%"));
}

#[test]
fn charts_render_daily_category_and_trend_views() {
    let temp = tempdir().unwrap();
    cli(temp.path())
        .write_stdin("chart\nchart category\nchart trend\nexit\n")
        .assert()
        .success()
        .stdout(contains("Daily Spending"))
        .stdout(contains("Spending by Category"))
        .stdout(contains("Spending Trend (14 days)"))
        .stdout(contains("#"));
}

#[test]
fn summary_of_an_empty_week_prints_a_notice() {
    let temp = tempdir().unwrap();
    // Only an old expense on file: the current week has no spending.
    let stored = r#"{"schema_version":1,"expenses":[
        {"id":"7f9a1c2e-0000-4000-8000-000000000001","date":"2020-01-06","amount":5.0,"category":"Food","notes":"Old lunch"}
    ]}"#;
    std::fs::write(temp.path().join("expenses.json"), stored).unwrap();

    cli(temp.path())
        .write_stdin("summary\nchart trend\nexit\n")
        .assert()
        .success()
        .stdout(contains("No expenses recorded for this week."))
        .stdout(contains("No expenses recorded in the trend window."));
}

#[test]
fn unknown_chart_kind_lists_the_valid_ones() {
    let temp = tempdir().unwrap();
    cli(temp.path())
        .write_stdin("chart pie\nexit\n")
        .assert()
        .success()
        .stdout(contains("unknown chart `pie`"))
        .stdout(contains("daily, category, or trend"));
}
