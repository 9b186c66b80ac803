mod common;
use common::{cdk, init_db_with_data, setup_test_db, temp_out};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_report_by_client_groups_figures() {
    let db_path = setup_test_db("report_by_client");
    init_db_with_data(&db_path);

    // Acme: 3h logged; Globex: invoiced 1200 (draft)
    cdk()
        .args(["--db", &db_path, "report", "--by-client"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Acme")
                .and(predicate::str::contains("Globex"))
                .and(predicate::str::contains("3.00"))
                .and(predicate::str::contains("1200.00")),
        );
}

#[test]
fn test_report_monthly_groups_by_month() {
    let db_path = setup_test_db("report_monthly");
    init_db_with_data(&db_path);

    // extra entry in another month
    cdk()
        .args([
            "--db", &db_path, "time", "log", "2h", "--client", "1", "--date", "2025-06-15",
        ])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "report", "--monthly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-05").and(predicate::str::contains("2025-06")));
}

#[test]
fn test_report_paid_vs_invoiced_split() {
    let db_path = setup_test_db("report_paid_split");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "invoice", "send", "1"])
        .assert()
        .success();
    cdk()
        .args(["--db", &db_path, "invoice", "pay", "1"])
        .assert()
        .success();

    // the 1200 moved from the invoiced column to the paid column
    cdk()
        .args(["--db", &db_path, "report", "--by-client"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1200.00"));
}

#[test]
fn test_report_period_filter() {
    let db_path = setup_test_db("report_period");
    init_db_with_data(&db_path);

    cdk()
        .args([
            "--db", &db_path, "time", "log", "2h", "--client", "1", "--date", "2025-06-15",
        ])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "report", "--monthly", "--period", "2025-06"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-06").and(predicate::str::contains("2025-05").not()));
}

#[test]
fn test_report_dangling_client_collapses_to_unknown() {
    let db_path = setup_test_db("report_unknown_client");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "client", "del", "1"])
        .write_stdin("y\n")
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "report", "--by-client"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown Client"));
}

#[test]
fn test_report_export_csv() {
    let db_path = setup_test_db("report_export_csv");
    init_db_with_data(&db_path);

    let out = temp_out("report_export_csv", "csv");

    cdk()
        .args([
            "--db",
            &db_path,
            "report",
            "--by-client",
            "--format",
            "csv",
            "--file",
            &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported report");
    assert!(content.contains("Acme"));
    assert!(content.contains("client,hours,billable_hours"));
}
