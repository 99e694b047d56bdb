//! Command-line smoke tests for the livedev binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn livedev() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_livedev"));
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_lists_serve_options() {
    livedev()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--addr"))
        .stdout(predicate::str::contains("--strategy"))
        .stdout(predicate::str::contains("--debounce-ms"));
}

#[test]
fn test_missing_directory_fails() {
    let temp = TempDir::new().unwrap();

    livedev()
        .current_dir(temp.path())
        .args(["--dir", "does-not-exist", "--addr", "127.0.0.1:0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn test_invalid_address_rejected() {
    livedev()
        .args(["--addr", "not an address"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--addr"));
}

#[test]
fn test_bad_config_value_fails() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("livedev.toml"), "poll_interval_ms = 1\n").unwrap();

    livedev()
        .current_dir(temp.path())
        .args(["--addr", "127.0.0.1:0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("poll_interval_ms"));
}
