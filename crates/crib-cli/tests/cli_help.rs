use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("crib")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("verify"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("stage"))
        .stdout(predicate::str::contains("whoami"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("crib")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set-base-url"));
}

#[test]
fn test_verify_requires_both_ids_together() {
    cargo_bin_cmd!("crib")
        .args(["verify", "--user-id", "u1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--email"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("crib")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
