use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tally(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    // Keep every run away from the user's real config.
    cmd.arg("--config").arg(dir.path().join("config.json"));
    cmd
}

fn init_config(dir: &TempDir) {
    tally(dir).args(["config", "init"]).assert().success();
}

#[test]
fn parse_file_as_json() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let receipt = dir.path().join("deli.txt");
    fs::write(&receipt, "Corner Deli\n03/15/2024\nBagel $4.00\nTOTAL $12.50\n").unwrap();

    tally(&dir)
        .arg("parse")
        .arg(&receipt)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"merchant_name\": \"Corner Deli\""))
        .stdout(predicate::str::contains("\"amount\": \"12.50\""))
        .stdout(predicate::str::contains("\"date\": \"2024-03-15\""))
        .stdout(predicate::str::contains("\"category\": \"other\""));
}

#[test]
fn parse_stdin_as_text() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);

    tally(&dir)
        .args(["parse", "-", "--format", "text", "--today", "2026-01-05", "--show-confidence"])
        .write_stdin("Starbucks Coffee\nStore #1234\nThank you!")
        .assert()
        .success()
        .stdout(predicate::str::contains("Category: food (Food & Dining)"))
        .stdout(predicate::str::contains("Amount:   not found"))
        .stdout(predicate::str::contains("2026-01-05 (today)"))
        .stdout(predicate::str::contains("Parse confidence: 30%"));
}

#[test]
fn parse_empty_input() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);

    tally(&dir)
        .arg("parse")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to parse"));
}

#[test]
fn parse_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);

    tally(&dir)
        .args(["parse", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn parse_csv_to_file() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let receipt = dir.path().join("uber.txt");
    let out = dir.path().join("uber.csv");
    fs::write(&receipt, "Uber Trip\n$18.40\n$2.00 tip").unwrap();

    tally(&dir)
        .arg("parse")
        .arg(&receipt)
        .args(["-f", "csv", "--today", "2026-10-19", "-o"])
        .arg(&out)
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.contains("Uber Trip,transport,18.40,2026-10-19,false,0.7"));
}

#[test]
fn classify_merchants() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);

    tally(&dir)
        .args(["classify", "Shell Gas Station"])
        .assert()
        .success()
        .stdout("transport\n");

    tally(&dir)
        .args(["classify", "ACME Hardware"])
        .assert()
        .success()
        .stdout("other\n");

    tally(&dir)
        .args(["classify", ""])
        .assert()
        .success()
        .stdout("no input\n");
}

#[test]
fn custom_category_table() {
    let dir = TempDir::new().unwrap();
    let table = dir.path().join("table.json");
    fs::write(
        &table,
        r##"{"expense": [
            {"id": "pets", "name": "Pets", "icon": "paw", "color": "#123456", "keywords": ["PETCO"]},
            {"id": "other", "name": "Other", "icon": "dots", "color": "#000000"}
        ]}"##,
    )
    .unwrap();
    fs::write(
        dir.path().join("config.json"),
        format!(
            r#"{{"categories": {{"table_path": {}}}}}"#,
            serde_json_string(&table.display().to_string())
        ),
    )
    .unwrap();

    tally(&dir)
        .args(["classify", "Petco #1123"])
        .assert()
        .success()
        .stdout("pets\n");

    tally(&dir)
        .args(["categories", "--kind", "expense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pets"))
        .stdout(predicate::str::contains("food").not());
}

#[test]
fn invalid_category_table_is_rejected() {
    let dir = TempDir::new().unwrap();
    let table = dir.path().join("table.json");
    fs::write(
        &table,
        r##"{"expense": [{"id": "pets", "name": "Pets", "icon": "paw", "color": "#123456", "keywords": ["petco"]}]}"##,
    )
    .unwrap();
    fs::write(
        dir.path().join("config.json"),
        format!(
            r#"{{"categories": {{"table_path": {}}}}}"#,
            serde_json_string(&table.display().to_string())
        ),
    )
    .unwrap();

    tally(&dir)
        .args(["classify", "Petco"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("other"));
}

#[test]
fn categories_list_and_json() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);

    tally(&dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense categories:"))
        .stdout(predicate::str::contains("Income categories:"))
        .stdout(predicate::str::contains("salary"));

    tally(&dir)
        .args(["categories", "--kind", "income", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"freelance\""))
        .stdout(predicate::str::contains("\"keywords\"").not());
}

#[test]
fn batch_with_summary() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let receipts = dir.path().join("receipts");
    let out = dir.path().join("out");
    fs::create_dir_all(&receipts).unwrap();
    fs::write(receipts.join("a.txt"), "Pizza Hut\n$20.00").unwrap();
    fs::write(receipts.join("b.txt"), "Lyft\n$20.00").unwrap();
    fs::write(receipts.join("c.txt"), "Walmart\nno total").unwrap();
    fs::write(receipts.join("empty.txt"), "").unwrap();
    fs::write(receipts.join("ignored.jpg"), "binary").unwrap();

    let pattern = format!("{}/*", receipts.display());

    tally(&dir)
        .args(["batch", &pattern, "--summary", "--continue-on-error", "--today", "2026-10-19", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 4 files"))
        .stdout(predicate::str::contains("Spending by category:"))
        .stdout(predicate::str::contains("Food & Dining"))
        .stdout(predicate::str::contains("50.0%"))
        .stdout(predicate::str::contains("nothing to parse"));

    assert!(out.join("a.json").exists());
    assert!(out.join("c.json").exists());
    assert!(!out.join("empty.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,merchant_name,category,amount,date,confidence,error"));
    assert!(summary.contains("a.txt,success,Pizza Hut,food,20.00,2026-10-19,0.7,"));
    assert!(summary.contains("empty.txt,error,"));
}

#[test]
fn batch_totals_cover_more_than_default_limit() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    let receipts = dir.path().join("receipts");
    fs::create_dir_all(&receipts).unwrap();
    for i in 0..150 {
        fs::write(receipts.join(format!("r{:03}.txt", i)), "Corner Deli\nTotal $1.00").unwrap();
    }

    tally(&dir)
        .args(["batch", &format!("{}/*.txt", receipts.display()), "--summary", "-o"])
        .arg(dir.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 150 files"))
        .stdout(predicate::str::is_match(r"Total\s+150\.00").unwrap());
}

#[test]
fn batch_stops_on_error_by_default() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);
    fs::write(dir.path().join("empty.txt"), "").unwrap();

    tally(&dir)
        .args(["batch", &format!("{}/*.txt", dir.path().display())])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to parse"));
}

#[test]
fn config_get_and_set() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args(["config", "get", "store.default_limit"])
        .assert()
        .success()
        .stdout("100\n");

    tally(&dir)
        .args(["config", "set", "store.default_limit", "25"])
        .assert()
        .success();

    tally(&dir)
        .args(["config", "get", "store.default_limit"])
        .assert()
        .success()
        .stdout("25\n");

    tally(&dir)
        .args(["config", "set", "store.nope", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));

    tally(&dir)
        .args(["config", "set", "receipt.default_transaction_type", "refund"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));
}

#[test]
fn config_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    init_config(&dir);

    tally(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    tally(&dir).args(["config", "init", "--force"]).assert().success();

    tally(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exists"));
}

fn serde_json_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
