mod common;
use common::{cdk, init_db_with_data, setup_test_db, temp_out};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_export_clients_csv() {
    let db_path = setup_test_db("export_clients_csv");
    init_db_with_data(&db_path);

    let out = temp_out("export_clients_csv", "csv");

    cdk()
        .args([
            "--db", &db_path, "export", "--entity", "clients", "--format", "csv", "--file", &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("Acme"));
    assert!(content.contains("billing@acme.test"));
}

#[test]
fn test_export_time_json_range() {
    let db_path = setup_test_db("export_time_json");
    init_db_with_data(&db_path);

    let out = temp_out("export_time_json", "json");

    cdk()
        .args([
            "--db", &db_path, "export", "--entity", "time", "--format", "json", "--file", &out,
            "--range", "2025-05",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    assert!(content.contains("2025-05-02"));
    assert!(content.contains("2025-05-03"));
}

#[test]
fn test_export_range_excludes_other_months() {
    let db_path = setup_test_db("export_range_filter");
    init_db_with_data(&db_path);

    cdk()
        .args([
            "--db", &db_path, "time", "log", "1h", "--client", "1", "--date", "2025-07-01",
        ])
        .assert()
        .success();

    let out = temp_out("export_range_filter", "json");

    cdk()
        .args([
            "--db", &db_path, "export", "--entity", "time", "--format", "json", "--file", &out,
            "--range", "2025-05:2025-06",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    assert!(content.contains("2025-05-02"));
    assert!(!content.contains("2025-07-01"));
}

#[test]
fn test_export_invoices_includes_total() {
    let db_path = setup_test_db("export_invoices_total");
    init_db_with_data(&db_path);

    let out = temp_out("export_invoices_total", "csv");

    cdk()
        .args([
            "--db", &db_path, "export", "--entity", "invoices", "--format", "csv", "--file",
            &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("INV-2025-001"));
    assert!(content.contains("1200"));
}

#[test]
fn test_export_tasks_resolves_client_names() {
    let db_path = setup_test_db("export_tasks_names");
    init_db_with_data(&db_path);

    let out = temp_out("export_tasks_names", "csv");

    cdk()
        .args([
            "--db", &db_path, "export", "--entity", "tasks", "--format", "csv", "--file", &out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("Kickoff deck"));
    assert!(content.contains("Acme"));
}

#[test]
fn test_export_xlsx_and_pdf_write_files() {
    let db_path = setup_test_db("export_binary_formats");
    init_db_with_data(&db_path);

    let xlsx = temp_out("export_binary_formats", "xlsx");
    cdk()
        .args([
            "--db", &db_path, "export", "--entity", "clients", "--format", "xlsx", "--file",
            &xlsx,
        ])
        .assert()
        .success();
    let bytes = fs::read(&xlsx).expect("read xlsx");
    assert!(!bytes.is_empty());

    let pdf = temp_out("export_binary_formats", "pdf");
    cdk()
        .args([
            "--db", &db_path, "export", "--entity", "invoices", "--format", "pdf", "--file",
            &pdf,
        ])
        .assert()
        .success();
    let bytes = fs::read(&pdf).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative_path");
    init_db_with_data(&db_path);

    cdk()
        .args([
            "--db", &db_path, "export", "--entity", "clients", "--format", "csv", "--file",
            "relative.csv",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be absolute"));
}

#[test]
fn test_export_force_overwrites_existing_file() {
    let db_path = setup_test_db("export_force");
    init_db_with_data(&db_path);

    let out = temp_out("export_force", "csv");
    fs::write(&out, "sentinel").expect("write sentinel");

    cdk()
        .args([
            "--db", &db_path, "export", "--entity", "clients", "--format", "csv", "--file", &out,
            "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(!content.contains("sentinel"));
    assert!(content.contains("Acme"));
}

#[test]
fn test_export_empty_range_warns_and_writes_nothing() {
    let db_path = setup_test_db("export_empty_range");
    init_db_with_data(&db_path);

    let out = temp_out("export_empty_range", "csv");

    cdk()
        .args([
            "--db", &db_path, "export", "--entity", "time", "--format", "csv", "--file", &out,
            "--range", "2019",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No records found"));

    assert!(!std::path::Path::new(&out).exists());
}
