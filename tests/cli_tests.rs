#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::NamedTempFile;

// 2026-10-12 is a Monday
const TODAY: &str = "2026-10-12";

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.env("COMPLETION_ESTIMATOR_TODAY", TODAY)
        .env_remove("COMPLETION_ESTIMATOR_CALENDAR")
        .write_stdin(script.to_string())
        .assert()
}

#[test]
fn cli_flags_late_jobs() {
    run_cli("add late 40 2026-10-13\nestimate\nquit\n")
        .success()
        .stdout(str_contains("Job upserted."))
        .stdout(str_contains("Estimated (today=2026-10-12, jobs=1"))
        .stdout(str_contains("Fri, Oct 16, 2026"))
        .stdout(str_contains("LATE +3d"));
}

#[test]
fn cli_started_jobs_are_labelled_in_progress() {
    run_cli("add a 4 - started\nshow\nquit\n")
        .success()
        .stdout(str_contains("In Progress"));
}

#[test]
fn cli_delete_command_removes_job() {
    run_cli("add a 5\nadd b 3\ndelete b\ndelete zz\nquit\n")
        .success()
        .stdout(str_contains("Deleted job b."))
        .stdout(str_contains("Job zz not found."));
}

#[test]
fn cli_reports_calendar_without_working_days() {
    // Sunday is already off by default
    run_cli(
        "add a 5\ncalendar dayoff 1\ncalendar dayoff 2\ncalendar dayoff 3\n\
         calendar dayoff 4\ncalendar dayoff 5\ncalendar dayoff 6\nestimate\nquit\n",
    )
    .success()
    .stdout(str_contains("Estimation error:"));
}

#[test]
fn cli_warns_about_over_completed_jobs() {
    run_cli("add a 5\nhours a 7\nestimate\nquit\n")
        .success()
        .stdout(str_contains("Warning: job a"))
        .stdout(str_contains("issues=1"));
}

#[test]
fn cli_rejects_unknown_commands() {
    run_cli("frobnicate\nquit\n")
        .success()
        .stdout(str_contains("Unknown command. Type 'help'."));
}

#[test]
fn cli_save_and_load_json_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().to_string();
    let script = format!(
        "add persisted 4\nsave json {path}\nadd scratch 1\nload json {path}\nshow\nquit\n"
    );
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(
        output.contains("Backlog loaded from"),
        "expected output to mention load completion"
    );
    let after_reload = output
        .split("Backlog loaded from")
        .last()
        .unwrap_or_default();
    assert!(after_reload.contains("persisted"));
    assert!(
        !after_reload.contains("scratch"),
        "unsaved job should not appear after reload:\n{after_reload}"
    );
}

#[test]
fn cli_prints_schedule_as_json() {
    run_cli("add late 40 2026-10-13\nestimate json\nquit\n")
        .success()
        .stdout(str_contains("\"jobId\": \"late\""))
        .stdout(str_contains("\"estimatedCompletionDate\": \"2026-10-16\""))
        .stdout(str_contains("\"isUrgent\": true"));
}
