//! Integration tests for the Folio CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Create a flat book directory for testing
fn create_test_book(dir: &TempDir) {
    fs::write(dir.path().join("README.md"), "# Welcome\n\nIntro text.\n")
        .expect("Failed to write test file");
    fs::write(
        dir.path().join("01-basics.md"),
        "---\ntitle: Basics\ndraft: true\n---\nText.\n",
    )
    .expect("Failed to write test file");
    fs::write(dir.path().join("02-closing.md"), "# Closing\n\nText.\n")
        .expect("Failed to write test file");
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("toc"))
        .stdout(predicate::str::contains("info"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("folio"));
}

#[test]
fn test_toc_lists_chapters_in_order() {
    let temp_dir = TempDir::new().unwrap();
    create_test_book(&temp_dir);

    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.args(["toc", temp_dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("[auto]"))
        .stdout(predicate::str::contains("[intro]"))
        .stdout(predicate::str::contains("Basics [draft]"))
        .stdout(predicate::str::contains("Closing"));
}

#[test]
fn test_info_plain_output() {
    let temp_dir = TempDir::new().unwrap();
    create_test_book(&temp_dir);

    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.args(["info", temp_dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Format:   auto"))
        .stdout(predicate::str::contains("Chapters: 3"))
        .stdout(predicate::str::contains("Drafts:   1"));
}

#[test]
fn test_info_json_output() {
    let temp_dir = TempDir::new().unwrap();
    create_test_book(&temp_dir);

    let mut cmd = Command::cargo_bin("folio").unwrap();
    let output = cmd
        .args(["info", "--json", temp_dir.path().to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["format"], "auto");
    assert_eq!(parsed["chapters"], 3);
    assert_eq!(parsed["drafts"], 1);
}

#[test]
fn test_book_root_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    create_test_book(&temp_dir);

    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.arg("info")
        .env("BOOK_ROOT", temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapters: 3"));
}

#[test]
fn test_empty_directory_fails() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.args(["toc", temp_dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no chapters found"));
}

#[test]
fn test_nonexistent_directory_fails() {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.args(["toc", "/nonexistent/book"]).assert().failure();
}
