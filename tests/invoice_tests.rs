mod common;
use common::{cdk, init_db_with_data, setup_test_db, temp_out};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_invoice_number_restarts_per_year() {
    let db_path = setup_test_db("invoice_numbering");
    init_db_with_data(&db_path);

    // seeded invoice is INV-2025-001
    cdk()
        .args(["--db", &db_path, "invoice", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-2025-001"));

    cdk()
        .args([
            "--db", &db_path, "invoice", "create", "--client", "1", "--item", "Consulting:2:100",
            "--date", "2025-11-30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-2025-002"));

    cdk()
        .args([
            "--db", &db_path, "invoice", "create", "--client", "1", "--item", "Consulting:1:100",
            "--date", "2026-01-05",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-2026-001"));
}

#[test]
fn test_invoice_total_derived_from_items() {
    let db_path = setup_test_db("invoice_total");
    init_db_with_data(&db_path);

    // 10 x 120 = 1200.00
    cdk()
        .args(["--db", &db_path, "invoice", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1200.00"));

    cdk()
        .args(["--db", &db_path, "invoice", "item", "1", "--add", "Travel:1:80.50"])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "invoice", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1280.50"));
}

#[test]
fn test_invoice_item_remove_compacts_positions() {
    let db_path = setup_test_db("invoice_item_remove");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "invoice", "item", "1", "--add", "Travel:1:80"])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "invoice", "item", "1", "--remove", "1"])
        .assert()
        .success();

    // the remaining item moved up to position 1
    cdk()
        .args(["--db", &db_path, "invoice", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Travel").and(predicate::str::contains("Security audit").not()));
}

#[test]
fn test_invoice_status_transitions() {
    let db_path = setup_test_db("invoice_transitions");
    init_db_with_data(&db_path);

    // pay before send is rejected
    cdk()
        .args(["--db", &db_path, "invoice", "pay", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid status transition"));

    cdk()
        .args(["--db", &db_path, "invoice", "send", "1"])
        .assert()
        .success();

    // items are frozen once sent
    cdk()
        .args(["--db", &db_path, "invoice", "item", "1", "--add", "Extra:1:10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only drafts"));

    cdk()
        .args(["--db", &db_path, "invoice", "pay", "1"])
        .assert()
        .success();

    // send again is rejected
    cdk()
        .args(["--db", &db_path, "invoice", "send", "1"])
        .assert()
        .failure();
}

#[test]
fn test_invoice_from_time_marks_entries_billed() {
    let db_path = setup_test_db("invoice_from_time");
    init_db_with_data(&db_path);

    cdk()
        .args([
            "--db", &db_path, "invoice", "create", "--client", "1", "--from-time", "2025-05",
            "--date", "2025-05-31",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-2025-002"));

    // both Acme entries are now flagged billed
    cdk()
        .args(["--db", &db_path, "time", "list", "--client", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("billed"));

    // nothing left to bill → error, not an empty invoice
    cdk()
        .args([
            "--db", &db_path, "invoice", "create", "--client", "1", "--from-time", "2025-05",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No unbilled time entries"));
}

#[test]
fn test_invoice_delete_guards_sent() {
    let db_path = setup_test_db("invoice_del_guard");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "invoice", "send", "1"])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "invoice", "del", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    cdk()
        .args(["--db", &db_path, "invoice", "del", "1", "--force"])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "invoice", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No invoices found."));
}

#[test]
fn test_invoice_pdf_written() {
    let db_path = setup_test_db("invoice_pdf");
    init_db_with_data(&db_path);

    let out = temp_out("invoice_pdf", "pdf");

    cdk()
        .args(["--db", &db_path, "invoice", "pdf", "1", "--file", &out])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read invoice pdf");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_invoice_list_overdue_highlight() {
    let db_path = setup_test_db("invoice_overdue");
    init_db_with_data(&db_path);

    // seeded invoice was issued 2025-05-20, so once sent it is overdue
    cdk()
        .args(["--db", &db_path, "invoice", "send", "1"])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "invoice", "list", "--status", "sent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sent !"));
}
