use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn forkful(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("forkful").unwrap();
    cmd.env("FORKFUL_DATA_DIR", data_dir);
    cmd
}

#[test]
fn add_list_clear_flow() {
    let tmp = tempfile::tempdir().unwrap();

    forkful(tmp.path())
        .args(["add", "Tomato Soup", "--notes", "simmer 20 min"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tomato Soup"));

    forkful(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tomato Soup"))
        .stdout(predicate::str::contains("simmer 20 min"));

    forkful(tmp.path())
        .args(["clear", "--yes"])
        .assert()
        .success();

    forkful(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No recipes yet"));
}

#[test]
fn add_with_blank_name_fails() {
    let tmp = tempfile::tempdir().unwrap();

    forkful(tmp.path())
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));

    forkful(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No recipes yet"));
}

#[test]
fn destructive_commands_require_confirmation() {
    let tmp = tempfile::tempdir().unwrap();

    forkful(tmp.path())
        .arg("clear")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    let backup = tmp.path().join("backup.json");
    std::fs::write(&backup, r#"{"recipes": []}"#).unwrap();
    forkful(tmp.path())
        .args(["import", backup.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn export_then_import_round_trips() {
    let tmp = tempfile::tempdir().unwrap();
    let backup = tmp.path().join("backup.json");

    forkful(tmp.path())
        .args(["add", "Pancakes", "--notes", "weekend"])
        .assert()
        .success();

    forkful(tmp.path())
        .args(["export", backup.to_str().unwrap()])
        .assert()
        .success();

    forkful(tmp.path())
        .args(["clear", "--yes"])
        .assert()
        .success();

    forkful(tmp.path())
        .args(["import", backup.to_str().unwrap(), "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 recipes"));

    forkful(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pancakes"));
}

#[test]
fn import_rejects_malformed_backup() {
    let tmp = tempfile::tempdir().unwrap();
    let backup = tmp.path().join("bad.json");
    std::fs::write(&backup, r#"{"meta": {}}"#).unwrap();

    forkful(tmp.path())
        .args(["import", backup.to_str().unwrap(), "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("recipes"));
}
