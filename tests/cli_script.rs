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
fn script_mode_runs_a_basic_flow() {
    let temp = tempdir().unwrap();
    cli(temp.path())
        .write_stdin("add 2024-03-01 12.50 food \"Team lunch\"\nlist Team\nexit\n")
        .assert()
        .success()
        .stdout(contains("Expense added"))
        .stdout(contains("Team lunch"));
}

#[test]
fn first_run_seeds_the_sample_dataset() {
    let temp = tempdir().unwrap();
    cli(temp.path())
        .write_stdin("list\nexit\n")
        .assert()
        .success()
        .stdout(contains("Lunch at cafe"))
        .stdout(contains("10 expenses."));
}

#[test]
fn unknown_commands_suggest_the_closest_name() {
    let temp = tempdir().unwrap();
    cli(temp.path())
        .write_stdin("lst\nexit\n")
        .assert()
        .success()
        .stdout(contains("`lst` is not a command"))
        .stdout(contains("Did you mean `list`?"));
}

#[test]
fn invalid_dates_report_an_error_and_keep_the_session_alive() {
    let temp = tempdir().unwrap();
    cli(temp.path())
        .write_stdin("add notadate 5 food\nversion\nexit\n")
        .assert()
        .success()
        .stdout(contains("invalid date `notadate`"))
        .stdout(contains("Expense Core"));
}

#[test]
fn queued_answers_drive_the_add_form() {
    let temp = tempdir().unwrap();
    cli(temp.path())
        .env("EXPENSE_CORE_TEST_INPUTS", "2024-03-05|4.75|Morning espresso")
        .env("EXPENSE_CORE_TEST_SELECTS", "0")
        .write_stdin("add\nlist espresso\nexit\n")
        .assert()
        .success()
        .stdout(contains("Expense added"))
        .stdout(contains("Morning espresso"));
}

#[test]
fn escaping_the_form_cancels_cleanly() {
    let temp = tempdir().unwrap();
    cli(temp.path())
        .env("EXPENSE_CORE_TEST_INPUTS", "<ESC>")
        .write_stdin("add\nexit\n")
        .assert()
        .success()
        .stdout(contains("Expense entry cancelled."));
}

#[test]
fn storage_reports_location_and_schema() {
    let temp = tempdir().unwrap();
    cli(temp.path())
        .write_stdin("storage\nexit\n")
        .assert()
        .success()
        .stdout(contains("JSON file at"))
        .stdout(contains("Available: yes"))
        .stdout(contains("Schema: v1"));
}

#[test]
fn config_changes_survive_a_restart() {
    let temp = tempdir().unwrap();
    cli(temp.path())
        .write_stdin("config set export_base trip-report\nexit\n")
        .assert()
        .success()
        .stdout(contains("Preferences updated."));
    cli(temp.path())
        .write_stdin("config\nexit\n")
        .assert()
        .success()
        .stdout(contains("trip-report"));
}

#[test]
fn help_shows_usage_for_a_single_command() {
    let temp = tempdir().unwrap();
    cli(temp.path())
        .write_stdin("help export\nexit\n")
        .assert()
        .success()
        .stdout(contains("help: export"))
        .stdout(contains("export [directory]"));
}
