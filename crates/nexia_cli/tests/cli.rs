use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn nexia() -> Command {
    let mut cmd = Command::cargo_bin("nexia").unwrap();
    cmd.env_remove("NEXIA_LOG_DIR");
    cmd
}

fn add(file: &Path, title: &str, extra: &[&str]) -> String {
    let output = nexia()
        .arg("add")
        .arg(file)
        .arg(title)
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success(), "add failed: {output:?}");
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn info_prints_ping_and_version() {
    nexia()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("ping=pong"))
        .stdout(predicate::str::contains("version="));
}

#[test]
fn new_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("book.nexia.json");

    nexia().arg("new").arg(&file).assert().success();
    assert!(file.exists());
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(saved["name"], "Untitled");
    assert!(saved["created_at"].as_i64().unwrap() > 0);
    assert_eq!(saved["created_at"], saved["modified_at"]);

    nexia()
        .arg("new")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite"));
}

#[test]
fn new_accepts_notebook_name() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("named.nexia.json");

    nexia()
        .arg("new")
        .arg(&file)
        .args(["--name", "Research"])
        .assert()
        .success();
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(saved["name"], "Research");
}

#[test]
fn add_link_list_and_remove() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("book.nexia.json");
    nexia().arg("new").arg(&file).assert().success();

    let first = add(&file, "Ownership", &["--content", "moves and borrows"]);
    let second = add(&file, "Lifetimes", &["--at", "10,20"]);

    nexia()
        .args(["link"])
        .arg(&file)
        .args([&first, &second])
        .assert()
        .success();

    nexia()
        .arg("list")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{first}\tOwnership\t{second}"
        )))
        .stdout(predicate::str::contains(format!("{second}\tLifetimes\t")));

    nexia()
        .arg("search")
        .arg(&file)
        .arg("BORROW")
        .assert()
        .success()
        .stdout(predicate::str::contains(first.as_str()))
        .stdout(predicate::str::contains(second.as_str()).not());

    nexia()
        .arg("remove")
        .arg(&file)
        .arg(&second)
        .assert()
        .success();

    nexia()
        .arg("list")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{first}\tOwnership\t\n")))
        .stdout(predicate::str::contains("Lifetimes").not());
}

#[test]
fn link_to_unknown_note_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("book.nexia.json");
    nexia().arg("new").arg(&file).assert().success();
    let only = add(&file, "Lonely", &[]);

    nexia()
        .arg("link")
        .arg(&file)
        .args([only.as_str(), "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("note not found: missing"));
}

#[test]
fn missing_file_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    nexia()
        .arg("list")
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}
