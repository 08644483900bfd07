//! Command-line tests for the contact-book binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn contact_book(file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("contact-book").unwrap();
    cmd.arg("--file").arg(file).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_add_then_list() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("contacts.json");

    contact_book(&file)
        .args(["add", "--name", "Ada Lovelace", "--phone", "555-123-4567"])
        .args(["--email", "ada@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact 'Ada Lovelace' added successfully!"));

    contact_book(&file)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Name: Ada Lovelace"));
}

#[test]
fn test_add_invalid_phone_fails() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("contacts.json");

    contact_book(&file)
        .args(["add", "--name", "Ada", "--phone", "555-CALL-NOW"])
        .args(["--email", "ada@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Phone number may only contain"));

    assert!(!file.exists());
}

#[test]
fn test_add_duplicate_needs_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("contacts.json");
    fs::write(
        &file,
        r#"[{"name": "bob", "phone": "555-123-4567", "email": "bob@example.com"}]"#,
    )
    .unwrap();

    contact_book(&file)
        .args(["add", "--name", "Bob", "--phone", "555-999-0000", "--email", "b@new.org"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    contact_book(&file)
        .args(["add", "--name", "Bob", "--phone", "555-999-0000", "--email", "b@new.org"])
        .arg("--overwrite")
        .assert()
        .success()
        .stdout(predicate::str::contains("Replaced 1 existing contact(s)"));

    let content = fs::read_to_string(&file).unwrap();
    assert!(content.contains("b@new.org"));
    assert!(!content.contains("bob@example.com"));
}

#[test]
fn test_search() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("contacts.json");
    fs::write(
        &file,
        r#"[{"name": "Ada", "phone": "555-123-4567", "email": "ada@example.com"},
            {"name": "Grace", "phone": "555-222-3333", "email": "grace@example.com"}]"#,
    )
    .unwrap();

    contact_book(&file)
        .args(["search", "gra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Grace").and(predicate::str::contains("Ada").not()));

    contact_book(&file)
        .args(["search", "zed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No contacts found matching your search."));
}

#[test]
fn test_delete_requires_yes() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("contacts.json");
    fs::write(
        &file,
        r#"[{"name": "Ada", "phone": "555-123-4567", "email": "ada@example.com"}]"#,
    )
    .unwrap();

    contact_book(&file)
        .args(["delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("without --yes"));

    contact_book(&file)
        .args(["delete", "2", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid contact number 2"));

    contact_book(&file)
        .args(["delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact 'Ada' deleted successfully!"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "[]");
}

#[test]
fn test_list_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("contacts.json");
    fs::write(&file, "not valid json").unwrap();

    contact_book(&file)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No contacts found."))
        .stderr(predicate::str::contains("Error loading contacts"));
}

#[test]
fn test_interactive_session_over_stdin() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("contacts.json");

    contact_book(&file)
        .write_stdin("1\nAda\n555-123-4567\nada@example.com\n2\n6\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Contact 'Ada' added successfully!")
                .and(predicate::str::contains("Thank you for using Contact Manager!")),
        );

    assert!(fs::read_to_string(&file).unwrap().contains("ada@example.com"));
}

#[test]
fn test_interactive_end_of_input() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("contacts.json");

    contact_book(&file)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Program interrupted. Goodbye!"));
}
