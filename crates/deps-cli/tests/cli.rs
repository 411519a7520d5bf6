use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn depsdownloader(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("depsdownloader").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn assert_untouched(dir: &TempDir) {
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_no_arguments_prints_usage() {
    let dir = TempDir::new().unwrap();
    depsdownloader(&dir)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
    assert_untouched(&dir);
}

#[test]
fn test_missing_library_prints_usage() {
    let dir = TempDir::new().unwrap();
    depsdownloader(&dir)
        .arg("downloadSearch")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
    assert_untouched(&dir);
}

#[test]
fn test_unknown_subcommand_prints_usage() {
    let dir = TempDir::new().unwrap();
    depsdownloader(&dir)
        .args(["download", "--okhttp"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
    assert_untouched(&dir);
}

#[test]
fn test_library_without_dashes_prints_usage() {
    let dir = TempDir::new().unwrap();
    depsdownloader(&dir)
        .args(["downloadSearch", "okhttp"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--<library_name>"));
    assert_untouched(&dir);
}

#[test]
fn test_two_libraries_prints_usage() {
    let dir = TempDir::new().unwrap();
    depsdownloader(&dir)
        .args(["downloadSearch", "--okhttp", "--retrofit"])
        .assert()
        .code(2);
    assert_untouched(&dir);
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    depsdownloader(&dir)
        .args(["downloadSearch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--search-url"));
}

#[test]
fn test_unreachable_search_endpoint_fails() {
    let dir = TempDir::new().unwrap();
    depsdownloader(&dir)
        .args([
            "--no-banner",
            "downloadSearch",
            "--search-url",
            "http://127.0.0.1:9/select",
            "--okhttp",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to fetch okhttp"));
    assert_untouched(&dir);
}
