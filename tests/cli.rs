use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "budget-pulse";

const SNAPSHOT: &str = r#"{
  "budgets": [
    { "id": "b1", "category": "Rent", "percentage": 30 },
    { "id": "b2", "category": "Dining", "percentage": "10" }
  ],
  "transactions": [
    { "id": "t1", "accountId": "a1", "type": "income", "category": "Salary", "amount": 5000, "transactionDate": "2025-03-01" },
    { "id": "t2", "accountId": "a1", "type": "expense", "category": "Rent", "amount": "1500.00", "transactionDate": "2025-03-02" },
    { "id": "t3", "accountId": "a1", "type": "expense", "category": "Dining", "amount": 600, "transactionDate": "2025-03-03" },
    { "id": "t4", "accountId": "a1", "type": "expense", "category": "Dining", "amount": 40, "transactionDate": "2025-02-27" }
  ],
  "accounts": [
    { "id": "a1", "name": "Checking", "type": "checking", "balance": 2860 }
  ],
  "goals": [
    { "id": "g1", "title": "Emergency fund", "targetAmount": 6000, "currentAmount": 1500 }
  ]
}"#;

/// A command isolated in its own data directory, pointed at a closed port
fn command(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("BUDGET_PULSE_DATA_DIR", data_dir)
        .env("BUDGET_PULSE_API_URL", "http://127.0.0.1:9/api")
        .env_remove("RUST_LOG");
    cmd
}

fn write_snapshot(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("snapshot.json");
    fs::write(&path, SNAPSHOT).expect("write snapshot");
    path
}

#[test]
fn analyze_snapshot_as_json() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir);

    command(dir.path())
        .args(["analyze", "--month", "2025-03", "--json", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("\"month\": \"2025-03\""))
        .stdout(contains("\"totalIncome\": 5000.0"))
        .stdout(contains("\"status\": \"warning\""))
        .stdout(contains("\"status\": \"exceeded\""))
        .stdout(contains("\"priority\": \"high\""));
}

#[test]
fn analyze_snapshot_report() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir);

    command(dir.path())
        .args(["analyze", "--month", "2025-03", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("Budget analysis for 2025-03"))
        .stdout(contains("Overspent in Dining"));
}

#[test]
fn analyze_writes_csv() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir);
    let csv = dir.path().join("progress.csv");

    command(dir.path())
        .args(["analyze", "--month", "2025-03", "--input"])
        .arg(&input)
        .arg("--csv")
        .arg(&csv)
        .assert()
        .success()
        .stdout(contains("Exported 2 budgets"));

    let text = fs::read_to_string(&csv).unwrap();
    assert!(text.starts_with("month,budget_id,category"));
    assert!(text.contains("2025-03,b2,Dining,10.0,500.00,600.00,-100.00"));
}

#[test]
fn insights_from_snapshot() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir);

    command(dir.path())
        .args(["insights", "--month", "2025-03", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("[HIGH] Overspent in Dining"))
        .stdout(contains("[MED]  Near limit in Rent"));
}

#[test]
fn check_purchase_locally() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir);

    command(dir.path())
        .args(["check-purchase", "600", "--month", "2025-03", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("You can afford this $600.00 purchase."))
        .stdout(contains("Disposable income: $3,000.00"));

    command(dir.path())
        .args(["check-purchase", "5000", "--month", "2025-03", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("Think twice"));
}

#[test]
fn check_purchase_rejects_zero() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir);

    command(dir.path())
        .args(["check-purchase", "0", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("Amount must be greater than zero"));
}

#[test]
fn transactions_for_month_from_snapshot() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir);

    command(dir.path())
        .args(["txn", "list", "--month", "2025-02", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("-$40.00"))
        .stdout(contains("$5,000.00").not());
}

#[test]
fn dashboard_from_snapshot() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir);

    command(dir.path())
        .args(["dashboard", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("Financial overview"))
        .stdout(contains("$2,860.00"))
        .stdout(contains("57/100"))
        .stdout(contains("Emergency fund"))
        .stdout(contains(" 25%"))
        .stdout(contains("AI insight").not());
}

#[test]
fn dashboard_as_json() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot(&dir);

    command(dir.path())
        .args(["dashboard", "--json", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("\"totalExpenses\": 2140.0"))
        .stdout(contains("\"healthScore\": 57"))
        .stdout(contains("\"activeGoals\": 1"))
        .stdout(contains("\"category\": \"Dining\""));
}

#[test]
fn goals_and_notifications_require_login() {
    let dir = TempDir::new().unwrap();

    command(dir.path())
        .args(["goal", "list"])
        .assert()
        .failure()
        .stderr(contains("User not logged in"));

    command(dir.path())
        .args(["notifications", "add", "Rent is due"])
        .assert()
        .failure()
        .stderr(contains("User not logged in"));
}

#[test]
fn offline_without_sync_explains() {
    let dir = TempDir::new().unwrap();

    command(dir.path())
        .args(["analyze", "--offline"])
        .assert()
        .failure()
        .stderr(contains("budget-pulse sync"));
}

#[test]
fn budget_categories_needs_no_login() {
    let dir = TempDir::new().unwrap();

    command(dir.path())
        .args(["budget", "categories"])
        .assert()
        .success()
        .stdout(contains("Expense categories"))
        .stdout(contains("Rent"));
}

#[test]
fn backend_commands_require_login() {
    let dir = TempDir::new().unwrap();

    command(dir.path())
        .args(["budget", "list"])
        .assert()
        .failure()
        .stderr(contains("User not logged in"));

    command(dir.path())
        .arg("whoami")
        .assert()
        .failure()
        .stderr(contains("User not logged in"));
}

#[test]
fn logout_without_session() {
    let dir = TempDir::new().unwrap();

    command(dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(contains("Not logged in."));
}

#[test]
fn config_shows_overridden_url() {
    let dir = TempDir::new().unwrap();

    command(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(contains("http://127.0.0.1:9/api"))
        .stdout(contains("Not logged in"));
}
