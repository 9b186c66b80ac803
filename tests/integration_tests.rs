mod common;
use common::{cdk, init_db, init_db_with_data, setup_test_db, temp_out};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("init_schema");
    init_db(&db_path);

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    for table in ["clients", "tasks", "time_entries", "invoices", "invoice_items", "users", "activity_log"] {
        let found: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )
            .ok();
        assert_eq!(found.as_deref(), Some(table), "missing table {table}");
    }
}

#[test]
fn test_init_is_idempotent() {
    let db_path = setup_test_db("init_twice");
    init_db(&db_path);
    init_db(&db_path);

    cdk()
        .args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success();
}

#[test]
fn test_db_info_reports_counts() {
    let db_path = setup_test_db("db_info");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clients").and(predicate::str::contains("invoices")));
}

#[test]
fn test_db_check_passes_on_clean_db() {
    let db_path = setup_test_db("db_check_clean");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Integrity check passed")
                .and(predicate::str::contains("No dangling references")),
        );
}

#[test]
fn test_db_vacuum_runs() {
    let db_path = setup_test_db("db_vacuum");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "db", "--vacuum"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vacuum completed"));
}

#[test]
fn test_activity_log_records_operations() {
    let db_path = setup_test_db("activity_log");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Created client 'Acme'")
                .and(predicate::str::contains("Created invoice INV-2025-001")),
        );
}

#[test]
fn test_activity_log_limit() {
    let db_path = setup_test_db("activity_log_limit");
    init_db_with_data(&db_path);

    // newest rows win: the seeded invoice is the last operation
    cdk()
        .args(["--db", &db_path, "log", "--print", "--limit", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("INV-2025-001")
                .and(predicate::str::contains("Created client 'Acme'").not()),
        );
}

#[test]
fn test_dashboard_renders_summary() {
    let db_path = setup_test_db("dashboard");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "dashboard"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Active clients:")
                .and(predicate::str::contains("Open tasks:"))
                .and(predicate::str::contains("Recent activity:")),
        );
}

#[test]
fn test_backup_copies_database() {
    let db_path = setup_test_db("backup_plain");
    init_db_with_data(&db_path);

    let out = temp_out("backup_plain", "sqlite");

    cdk()
        .args(["--db", &db_path, "backup", "--file", &out])
        .assert()
        .success();

    let original = fs::metadata(&db_path).expect("source db").len();
    let copy = fs::metadata(&out).expect("backup file").len();
    assert_eq!(original, copy);
}

#[test]
fn test_backup_compress_produces_zip() {
    let db_path = setup_test_db("backup_zip");
    init_db_with_data(&db_path);

    let out = temp_out("backup_zip", "sqlite");

    cdk()
        .args(["--db", &db_path, "backup", "--file", &out, "--compress"])
        .assert()
        .success();

    let zip_path = std::path::Path::new(&out).with_extension("zip");
    let bytes = fs::read(&zip_path).expect("read zip backup");
    assert!(bytes.starts_with(b"PK"));
    // uncompressed copy is removed
    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_user_profile_roundtrip() {
    let db_path = setup_test_db("user_profile");
    init_db(&db_path);

    cdk()
        .args([
            "--db",
            &db_path,
            "user",
            "set",
            "--name",
            "Ada",
            "--email",
            "ada@example.test",
        ])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "user", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada").and(predicate::str::contains("ada@example.test")));
}

#[test]
fn test_user_isolation() {
    let db_path = setup_test_db("user_isolation");
    init_db_with_data(&db_path);

    // a second user sees none of the seeded records
    cdk()
        .args(["--db", &db_path, "--user", "other", "client", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No clients found."));

    cdk()
        .args(["--db", &db_path, "--user", "other", "task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}
