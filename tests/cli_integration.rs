//! CLI integration tests.
//!
//! These tests invoke the tpanel binary and verify command output and behaviour.
//! stdout is captured, so the panel itself is never drawn and only the
//! summary printed after it closes is visible.

#![allow(deprecated)] // cargo_bin is deprecated but still works

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

/// Helper to get a Command for the tpanel binary.
fn tpanel() -> Command {
    let mut cmd = Command::cargo_bin("tpanel").unwrap();
    cmd.env_remove("TPANEL_CONFIG").env_remove("TPANEL_THEME");
    cmd
}

// ============================================================================
// Basic CLI tests
// ============================================================================

#[test]
fn test_no_args_shows_usage() {
    tpanel()
        .assert()
        .success()
        .stdout(predicate::str::contains("tpanel"))
        .stdout(predicate::str::contains("Quick start"));
}

#[test]
fn test_help_flag() {
    tpanel()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_version_flag() {
    tpanel()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tpanel"));
}

// ============================================================================
// Run command tests
// ============================================================================

#[cfg(unix)]
#[test]
fn test_run_success_prints_summary() {
    tpanel()
        .args(["run", "--", "sh", "-c", "echo hello; echo world"])
        .assert()
        .success()
        .stdout(predicate::str::contains("finished in"))
        .stdout(predicate::str::contains("Summary"))
        .stdout(predicate::str::contains("lines captured"))
        .stdout(predicate::str::contains("2"));
}

#[cfg(unix)]
#[test]
fn test_run_output_is_not_left_behind() {
    tpanel()
        .args(["run", "--", "sh", "-c", "echo leftover$((40+2))"])
        .assert()
        .success()
        .stdout(predicate::str::contains("leftover42").not());
}

#[cfg(unix)]
#[test]
fn test_run_redirected_does_not_query_terminal() {
    tpanel()
        .args(["run", "--", "sh", "-c", "printf '\\033[31mred\\033[0m\\n'"])
        .timeout(Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[6n").not())
        .stdout(predicate::str::contains("red\x1b[0m").not())
        .stdout(predicate::str::contains("lines captured"));
}

#[cfg(unix)]
#[test]
fn test_run_mirrors_exit_code() {
    tpanel()
        .args(["run", "--", "sh", "-c", "echo failing; exit 3"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("failed with exit status"))
        .stdout(predicate::str::contains("3"));
}

#[test]
fn test_run_missing_program() {
    tpanel()
        .args(["run", "--", "definitely-not-a-real-program-xyz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to start"));
}

#[test]
fn test_run_requires_command() {
    tpanel().arg("run").assert().failure();
}

#[test]
fn test_run_rejects_display_above_max() {
    tpanel()
        .args(["run", "--display-lines", "30", "--max-lines", "20", "--", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "display_lines (30) must not exceed max_lines (20)",
        ));
}

#[test]
fn test_run_rejects_zero_refresh() {
    tpanel()
        .args(["run", "--refresh", "0", "--", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refresh_per_second"));
}

#[test]
fn test_run_rejects_unknown_set_key() {
    tpanel()
        .args(["run", "--set", "colour=red", "--", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: colour"));
}

#[test]
fn test_run_rejects_malformed_set() {
    tpanel()
        .args(["run", "--set", "display_lines", "--", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected key=value"));
}

#[test]
fn test_run_rejects_unknown_preset() {
    tpanel()
        .args(["run", "--preset", "huge", "--", "true"])
        .assert()
        .failure();
}

#[cfg(unix)]
#[test]
fn test_run_with_config_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("panel.toml");
    fs::write(&path, "max_lines = 10\ndisplay_lines = 4\nborder_style = \"blue\"\n").unwrap();

    tpanel()
        .args(["run", "--config"])
        .arg(&path)
        .args(["--", "sh", "-c", "echo from-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary"));
}

#[test]
fn test_run_with_invalid_config_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("panel.toml");
    fs::write(&path, "max_lines = 5\ndisplay_lines = 9\n").unwrap();

    tpanel()
        .args(["run", "--config"])
        .arg(&path)
        .args(["--", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not exceed"));
}

#[test]
fn test_run_with_unparseable_config_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("panel.toml");
    fs::write(&path, "max_lines = \"lots\"\n").unwrap();

    tpanel()
        .args(["run", "--config"])
        .arg(&path)
        .args(["--", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

// ============================================================================
// Themes and completions
// ============================================================================

#[test]
fn test_themes_lists_all() {
    tpanel()
        .arg("themes")
        .assert()
        .success()
        .stdout(predicate::str::contains("default"))
        .stdout(predicate::str::contains("nord"))
        .stdout(predicate::str::contains("dracula"));
}

#[test]
fn test_themes_single() {
    tpanel()
        .args(["themes", "muted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("muted"))
        .stdout(predicate::str::contains("nord").not());
}

#[test]
fn test_themes_unknown() {
    tpanel()
        .args(["themes", "solarized"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown theme: solarized"));
}

#[test]
fn test_completions_bash() {
    tpanel()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tpanel"));
}

#[test]
fn test_completions_invalid_shell() {
    tpanel().args(["completions", "powershell"]).assert().failure();
}
