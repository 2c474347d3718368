use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("jobbot").unwrap()
}

#[test]
fn invalid_work_type_aborts_without_output() {
    let dir = TempDir::new().expect("create temp dir");
    let config = dir.path().join("config.yaml");
    fs::write(
        &config,
        "linkedin:\n  keywords: engineer\n  location: Remote\n  f_WT: 7\n",
    )
    .expect("write config");

    cmd()
        .args(["run", "--config"])
        .arg(&config)
        .assert()
        .code(2)
        .stdout("")
        .stderr(contains("f_WT must be 1, 2, or 3"));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().expect("create temp dir");

    cmd()
        .args(["run", "--config"])
        .arg(dir.path().join("nope.yaml"))
        .assert()
        .code(2)
        .stdout("")
        .stderr(contains("Failed to read config"));
}

#[test]
fn help_lists_run_options() {
    cmd()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(contains("--no-print-urls"));
}

#[test]
fn oversized_delay_is_rejected_as_config_error() {
    let dir = TempDir::new().expect("create temp dir");
    let config = dir.path().join("config.yaml");
    fs::write(
        &config,
        "keywords: engineer\nlocation: Remote\ndelay_seconds: 1.0e300\n",
    )
    .expect("write config");

    cmd()
        .args(["run", "--config"])
        .arg(&config)
        .assert()
        .code(2)
        .stdout("")
        .stderr(contains("delay_seconds"));
}
