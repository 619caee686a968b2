use assert_cmd::Command;
use chrono::{Datelike, NaiveDate};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

// Helper function to set up a test Command instance
fn set_up_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("moodpet").unwrap();
    cmd.env_clear()
        .env("HOME", home)
        .env("MOODPET_DIR", home.join("data"))
        .env("MOODPET_EXPORT_DIR", home.join("exports"))
        .env("NO_COLOR", "1");
    cmd
}

fn mood_file(home: &Path) -> String {
    fs::read_to_string(home.join("data").join("mood_log.json")).unwrap()
}

#[test]
fn test_cli_log_named_mood() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = set_up_command(temp_dir.path());

    cmd.args(["log", "happy", "--date", "2024-01-10"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Teto reacts!"));
    assert_eq!(mood_file(temp_dir.path()), "{\n    \"2024-01-10\": \"happy\"\n}");
}

#[test]
fn test_cli_log_overwrites_same_day() {
    let temp_dir = tempdir().unwrap();

    set_up_command(temp_dir.path())
        .args(["log", "happy", "-d", "20240110"])
        .assert()
        .success();
    set_up_command(temp_dir.path())
        .args(["log", "sad", "-d", "2024-01-10"])
        .assert()
        .success();

    assert_eq!(mood_file(temp_dir.path()), "{\n    \"2024-01-10\": \"sad\"\n}");
}

#[test]
fn test_cli_log_prompts_on_stdin() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = set_up_command(temp_dir.path());

    cmd.args(["log", "--date", "2024-02-01"]).write_stdin("5\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("How are you feeling today?"))
        .stdout(predicate::str::contains("drill-kick"));
    assert!(mood_file(temp_dir.path()).contains("\"2024-02-01\": \"angry\""));
}

#[test]
fn test_cli_log_dismissed() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = set_up_command(temp_dir.path());

    cmd.arg("log").write_stdin("d\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No mood logged."));
    assert!(!temp_dir.path().join("data").join("mood_log.json").exists());
}

#[test]
fn test_cli_invalid_date() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = set_up_command(temp_dir.path());

    cmd.args(["log", "happy", "--date", "not-a-date"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"))
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn test_cli_malformed_mood_file() {
    let temp_dir = tempdir().unwrap();
    let data_dir = temp_dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("mood_log.json"), "{ not json").unwrap();
    let mut cmd = set_up_command(temp_dir.path());

    cmd.args(["log", "happy"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Mood store error"));
    assert_eq!(
        fs::read_to_string(data_dir.join("mood_log.json")).unwrap(),
        "{ not json"
    );
}

#[test]
fn test_cli_export_empty() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = set_up_command(temp_dir.path());

    cmd.arg("export");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No mood data to export."));
    assert!(!temp_dir.path().join("exports").exists());
}

#[test]
fn test_cli_export_writes_csv() {
    let temp_dir = tempdir().unwrap();
    let out_dir = temp_dir.path().join("elsewhere");
    fs::create_dir_all(&out_dir).unwrap();

    set_up_command(temp_dir.path())
        .args(["log", "sad", "--date", "2024-03-05"])
        .assert()
        .success();
    set_up_command(temp_dir.path())
        .args(["log", "happy", "--date", "2024-01-10"])
        .assert()
        .success();

    set_up_command(temp_dir.path())
        .args(["export", "--out-dir"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mood data exported successfully to"));

    let files: Vec<_> = fs::read_dir(&out_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("moodpet_mood_export_"));
    assert!(name.ends_with(".csv"));
    assert_eq!(
        fs::read_to_string(&files[0]).unwrap(),
        "Date,Mood\r\n2024-01-10,happy\r\n2024-03-05,sad\r\n"
    );
}

#[test]
fn test_cli_export_to_missing_dir_fails() {
    let temp_dir = tempdir().unwrap();

    set_up_command(temp_dir.path())
        .args(["log", "meh"])
        .assert()
        .success();

    set_up_command(temp_dir.path())
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to export mood data to"));
}

#[test]
fn test_cli_calendar_shows_month_and_day() {
    let temp_dir = tempdir().unwrap();

    set_up_command(temp_dir.path())
        .args(["log", "tired", "--date", "2024-03-05"])
        .assert()
        .success();

    set_up_command(temp_dir.path())
        .args(["calendar", "--year", "2024", "--month", "3"])
        .write_stdin("5\nn\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("March 2024"))
        .stdout(predicate::str::contains("Mon Tue Wed Thu Fri Sat Sun"))
        .stdout(predicate::str::contains("--- Mood for 2024-03-05 ---"))
        .stdout(predicate::str::contains("April 2024"));
}

#[test]
fn test_cli_calendar_rejects_bad_month() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = set_up_command(temp_dir.path());

    cmd.args(["calendar", "--month", "13"]);

    cmd.assert().failure();
}

#[test]
fn test_cli_calendar_rejects_huge_year() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = set_up_command(temp_dir.path());

    cmd.args(["calendar", "-y", "2147483647", "-m", "12"])
        .write_stdin("n\nq\n");

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("2147483647"));
}

#[test]
fn test_cli_calendar_stops_at_last_month() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = set_up_command(temp_dir.path());

    let last_year = NaiveDate::MAX.year();
    cmd.args(["calendar", "-y", &last_year.to_string(), "-m", "12"])
        .write_stdin("n\nn\nq\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(format!("December {}", last_year)))
        .stdout(predicate::str::contains(format!("January {}", last_year + 1)).not());
}

#[test]
fn test_cli_moods_lists_catalog() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = set_up_command(temp_dir.path());

    cmd.arg("moods");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Mood Legend:"))
        .stdout(predicate::str::contains("Happy"))
        .stdout(predicate::str::contains("Meh"));
}

#[test]
fn test_cli_widget_commands_until_quit() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = set_up_command(temp_dir.path());

    // Whether the daily prompt fires depends on the wall clock, so only the
    // banner and the goodbye are checked.
    cmd.arg("widget").write_stdin("help\nquit\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Teto is here! Daily check-in at 15:00."))
        .stdout(predicate::str::contains("Bye!"));
}

#[test]
fn test_cli_invalid_prompt_time() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = set_up_command(temp_dir.path());

    cmd.env("MOODPET_PROMPT_AT", "25:99").arg("moods");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("MOODPET_PROMPT_AT"));
}

#[test]
fn test_cli_json_logs_go_to_stderr() {
    let temp_dir = tempdir().unwrap();
    let mut cmd = set_up_command(temp_dir.path());

    cmd.args(["--log-format", "json", "-v", "moods"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Mood Legend:"))
        .stdout(predicate::str::contains("correlation_id").not())
        .stderr(predicate::str::contains("\"correlation_id\""));
}
