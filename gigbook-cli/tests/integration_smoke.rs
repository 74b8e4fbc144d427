//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn gigbook() -> Command {
    Command::cargo_bin("gigbook").unwrap()
}

#[test]
fn test_top_level_help_lists_commands() {
    gigbook()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("seed"));
}

#[test]
fn test_serve_help() {
    gigbook()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--cors-permissive"));
}

#[test]
fn test_seed_help() {
    gigbook()
        .arg("seed")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_completions_bash() {
    gigbook()
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("gigbook"));
}

#[test]
fn test_migrate_without_database_url_fails() {
    let dir = tempfile::tempdir().unwrap();
    gigbook()
        .current_dir(dir.path())
        .env_remove("DATABASE_URL")
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL"));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    gigbook()
        .current_dir(dir.path())
        .args(["--config", "absent.toml", "migrate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.toml"));
}

#[test]
fn test_bad_bind_env_fails() {
    let dir = tempfile::tempdir().unwrap();
    gigbook()
        .current_dir(dir.path())
        .env("GIGBOOK_BIND", "not-an-address")
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GIGBOOK_BIND"));
}

#[test]
fn test_dotenv_log_filter_applies() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "RUST_LOG=debug\n").unwrap();
    gigbook()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("DATABASE_URL")
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("loaded environment from"));
}
