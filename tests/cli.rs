use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "ledger";

fn ledger(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("EXPENSE_LEDGER_DATA_DIR", dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn init_seeds_default_categories() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialization complete!"));

    ledger(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(contains("Food").and(contains("Groceries")).and(contains("Savings")));
}

#[test]
fn second_init_keeps_existing_catalog() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Default categories:"));
    ledger(&dir).args(["category", "delete", "Bills"]).assert().success();

    ledger(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Existing category catalog kept."));
    ledger(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(contains("Food").and(contains("Bills").not()));
}

#[test]
fn no_command_prints_hints() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .assert()
        .success()
        .stdout(contains("ledger --help"));
}

#[test]
fn duplicate_category_is_rejected() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .args(["category", "add", "Pets"])
        .assert()
        .success()
        .stdout(contains("Created category: Pets"));

    ledger(&dir)
        .args(["category", "add", "Pets"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn subcategory_for_unknown_category_fails() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .args(["category", "add-sub", "Nonexistent", "Thing"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn expense_round_trip_through_dashboard() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .args(["budget", "set", "1000"])
        .assert()
        .success()
        .stdout(contains("$1000.00"));

    ledger(&dir)
        .args([
            "expense", "add", "Food", "200", "--date", "2024-05-03", "--status", "Paid",
        ])
        .assert()
        .success()
        .stdout(contains("Recorded expense: exp-1"));

    ledger(&dir)
        .args([
            "expense", "add", "Food", "50", "--date", "2024-05-04",
        ])
        .assert()
        .success();

    ledger(&dir)
        .args([
            "expense", "add", "Savings", "100", "--date", "2024-05-05", "--status", "Paid",
        ])
        .assert()
        .success()
        .stdout(contains("transfer to savings"));

    ledger(&dir)
        .args(["report", "dashboard", "--month", "2024-05"])
        .assert()
        .success()
        .stdout(
            contains("May 2024")
                .and(contains("$200.00"))
                .and(contains("$50.00"))
                .and(contains("$100.00"))
                .and(contains("$800.00")),
        );
}

#[test]
fn dashboard_json_has_decimal_totals() {
    let dir = TempDir::new().unwrap();

    ledger(&dir).args(["budget", "set", "300"]).assert().success();
    ledger(&dir)
        .args([
            "expense", "add", "Transport", "12.50", "--date", "2024-06-10", "--status", "paid",
        ])
        .assert()
        .success();

    ledger(&dir)
        .args(["report", "dashboard", "--month", "2024-06", "--json"])
        .assert()
        .success()
        .stdout(contains("\"spent\": 12.5").and(contains("\"budget\": 300.0")));
}

#[test]
fn expense_status_and_delete() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .args(["expense", "add", "Food", "20", "--date", "2024-05-03"])
        .assert()
        .success();

    ledger(&dir)
        .args(["expense", "status", "exp-1", "paid"])
        .assert()
        .success()
        .stdout(contains("exp-1 is now Paid"));

    ledger(&dir)
        .args(["expense", "delete", "1"])
        .assert()
        .success()
        .stdout(contains("Deleted expense: exp-1"));

    ledger(&dir)
        .args(["expense", "show", "exp-1"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn invalid_amount_is_rejected() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .args(["expense", "add", "Food", "abc"])
        .assert()
        .failure();

    ledger(&dir)
        .args(["expense", "list", "--recent", "10"])
        .assert()
        .success()
        .stdout(contains("No expenses found."));
}

#[test]
fn lend_entries_and_totals() {
    let dir = TempDir::new().unwrap();

    ledger(&dir)
        .args(["lend", "add", "Alice", "40", "--date", "2024-05-02"])
        .assert()
        .success()
        .stdout(contains("Recorded lend: lb-1"));

    ledger(&dir)
        .args([
            "lend", "add", "Bob", "15", "--type", "borrow", "--date", "2024-04-20",
        ])
        .assert()
        .success();

    ledger(&dir)
        .args(["lend", "status", "lb-1", "Returned"])
        .assert()
        .success()
        .stdout(contains("lb-1 is now Returned"));

    ledger(&dir)
        .args(["lend", "list", "--all"])
        .assert()
        .success()
        .stdout(
            contains("Alice")
                .and(contains("Bob"))
                .and(contains("Lent (all time):     $40.00"))
                .and(contains("Borrowed (all time): $15.00")),
        );
}

#[test]
fn backup_and_restore_latest() {
    let dir = TempDir::new().unwrap();

    ledger(&dir).args(["budget", "set", "500"]).assert().success();

    ledger(&dir)
        .args(["backup", "create"])
        .assert()
        .success()
        .stdout(contains("Backup created: ledger-backup-"));

    ledger(&dir).args(["budget", "set", "900"]).assert().success();

    ledger(&dir)
        .args(["backup", "restore", "latest"])
        .assert()
        .success()
        .stdout(contains("--force"));

    ledger(&dir)
        .args(["backup", "restore", "latest", "--force"])
        .assert()
        .success()
        .stdout(contains("Restore complete."));

    ledger(&dir)
        .args(["budget", "show"])
        .assert()
        .success()
        .stdout(contains("$500.00"));
}
