#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn cdk() -> Command {
    cargo_bin_cmd!("clientdesk")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_clientdesk.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the schema on a throwaway DB (test mode: no config file update)
pub fn init_db(db_path: &str) {
    cdk()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB and add a small dataset useful for many tests:
/// - client #1 "Acme" and client #2 "Globex"
/// - task #1 for Acme, task #2 for Globex
/// - two billable time entries for Acme in 2025-05
/// - one draft invoice for Globex issued 2025-05-20
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    cdk()
        .args([
            "--db",
            db_path,
            "client",
            "add",
            "Acme",
            "--company",
            "Acme Corp",
            "--email",
            "billing@acme.test",
        ])
        .assert()
        .success();

    cdk()
        .args(["--db", db_path, "client", "add", "Globex"])
        .assert()
        .success();

    cdk()
        .args([
            "--db", db_path, "task", "add", "Kickoff deck", "--client", "1", "--due",
            "2025-05-10", "--priority", "high",
        ])
        .assert()
        .success();

    cdk()
        .args(["--db", db_path, "task", "add", "Audit", "--client", "2"])
        .assert()
        .success();

    cdk()
        .args([
            "--db", db_path, "time", "log", "1h30m", "--task", "1", "--date", "2025-05-02",
            "--note", "Outline",
        ])
        .assert()
        .success();

    cdk()
        .args([
            "--db", db_path, "time", "log", "90", "--client", "1", "--date", "2025-05-03",
        ])
        .assert()
        .success();

    cdk()
        .args([
            "--db",
            db_path,
            "invoice",
            "create",
            "--client",
            "2",
            "--item",
            "Security audit:10:120",
            "--date",
            "2025-05-20",
        ])
        .assert()
        .success();
}
