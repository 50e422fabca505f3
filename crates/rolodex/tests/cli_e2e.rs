//! End-to-end tests driving the compiled binary against a temp book file.

use assert_cmd::Command;
use predicates::prelude::*;

fn rolodex(book: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("rolodex").unwrap();
    cmd.arg("--book").arg(book);
    cmd
}

#[test]
fn add_then_list_round_trips_through_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let book = dir.path().join("book.json");

    rolodex(&book)
        .args([
            "add",
            "Anna Kowalska",
            "--phone",
            "123456789",
            "--email",
            "anna@example.com",
            "--tag",
            "work",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added record with ID: 1."));

    rolodex(&book)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ID: 1, Name: Anna Kowalska"))
        .stdout(predicate::str::contains("123456789"));
}

#[test]
fn invalid_phone_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let book = dir.path().join("book.json");

    rolodex(&book)
        .args(["add", "Anna", "--phone", "123-456-789"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid phone number"));

    // Nothing was saved.
    rolodex(&book)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("The address book is empty."));
}

#[test]
fn deleted_id_is_reused_by_the_next_add() {
    let dir = tempfile::tempdir().unwrap();
    let book = dir.path().join("book.json");

    rolodex(&book).args(["add", "Anna"]).assert().success();
    rolodex(&book).args(["add", "Jan"]).assert().success();
    rolodex(&book)
        .args(["delete", "--id", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted record 1: Anna"));

    rolodex(&book)
        .args(["add", "Ola"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added record with ID: 1."));
}

#[test]
fn delete_by_name_lists_candidates_and_suggests() {
    let dir = tempfile::tempdir().unwrap();
    let book = dir.path().join("book.json");

    rolodex(&book).args(["add", "Anna Kowalska"]).assert().success();
    rolodex(&book).args(["add", "Jan Nowak"]).assert().success();

    rolodex(&book)
        .args(["delete", "--name", "anna"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID: 1, Name: Anna Kowalska"));

    rolodex(&book)
        .args(["delete", "--name", "Ana Kowalska"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching records."))
        .stdout(predicate::str::contains("Did you mean: Anna Kowalska?"));
}

#[test]
fn find_matches_phone_substring() {
    let dir = tempfile::tempdir().unwrap();
    let book = dir.path().join("book.json");

    rolodex(&book)
        .args(["add", "Anna", "--phone", "123456789"])
        .assert()
        .success();

    rolodex(&book)
        .args(["find", "34567"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Anna"));

    rolodex(&book)
        .args(["find", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching records."));
}

#[test]
fn edit_applies_fields_independently() {
    let dir = tempfile::tempdir().unwrap();
    let book = dir.path().join("book.json");

    rolodex(&book)
        .args(["add", "Anna", "--phone", "111111111"])
        .assert()
        .success();

    // The bad birthday is reported, but the valid phone edit still lands.
    rolodex(&book)
        .args([
            "edit", "1", "--birthday", "someday", "--add-phone", "222222222",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipped birthday"))
        .stdout(predicate::str::contains("Updated record 1."));

    rolodex(&book)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("222222222"));
}
