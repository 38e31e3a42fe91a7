use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("crib")
        .env("CRIB_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    cargo_bin_cmd!("crib")
        .env("CRIB_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("api_base_url ="));
    assert!(contents.contains("resend_window_secs = 30"));
    assert!(contents.contains("# log_filter ="));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "# existing config").unwrap();

    cargo_bin_cmd!("crib")
        .env("CRIB_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_set_base_url_keeps_comments() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    cargo_bin_cmd!("crib")
        .env("CRIB_HOME", dir.path())
        .args(["config", "set-base-url", "http://localhost:4000/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:4000"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("api_base_url = \"http://localhost:4000\""));
    assert!(contents.contains("# Seconds before a new code can be requested"));
}

#[test]
fn test_set_base_url_rejects_garbage() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("crib")
        .env("CRIB_HOME", dir.path())
        .args(["config", "set-base-url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base URL"));
}
