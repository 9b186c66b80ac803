mod common;
use common::{cdk, init_db_with_data, setup_test_db};
use predicates::prelude::*;

#[test]
fn test_time_list_shows_total_row() {
    let db_path = setup_test_db("time_total");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "time", "list", "--period", "2025-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Total: 03h 00m (03h 00m billable) across 2 entries.",
        ));
}

#[test]
fn test_time_log_inherits_client_from_task() {
    let db_path = setup_test_db("time_inherit");
    init_db_with_data(&db_path);

    // task #2 belongs to Globex; no --client given
    cdk()
        .args([
            "--db", &db_path, "time", "log", "45m", "--task", "2", "--date", "2025-06-01",
        ])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "time", "list", "--client", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Globex").and(predicate::str::contains("00h 45m")));
}

#[test]
fn test_time_log_duration_forms() {
    let db_path = setup_test_db("time_durations");
    init_db_with_data(&db_path);

    for (duration, rendered) in [("2h", "02h 00m"), ("1h15m", "01h 15m"), ("30", "00h 30m")] {
        cdk()
            .args([
                "--db", &db_path, "time", "log", duration, "--client", "1", "--date",
                "2025-07-01",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(rendered));
    }
}

#[test]
fn test_time_log_rejects_bad_durations() {
    let db_path = setup_test_db("time_bad_duration");
    init_db_with_data(&db_path);

    for bad in ["0", "-30", "abc", "h30"] {
        cdk()
            .args(["--db", &db_path, "time", "log", bad, "--client", "1"])
            .assert()
            .failure();
    }
}

#[test]
fn test_time_log_missing_task_fails() {
    let db_path = setup_test_db("time_missing_task");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "time", "log", "30m", "--task", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("task not found"));
}

#[test]
fn test_not_billable_entry_excluded_from_billable_total() {
    let db_path = setup_test_db("time_not_billable");
    init_db_with_data(&db_path);

    cdk()
        .args([
            "--db",
            &db_path,
            "time",
            "log",
            "1h",
            "--client",
            "1",
            "--date",
            "2025-05-04",
            "--not-billable",
        ])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "time", "list", "--period", "2025-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Total: 04h 00m (03h 00m billable) across 3 entries.",
        ));
}

#[test]
fn test_time_del_removes_entry() {
    let db_path = setup_test_db("time_del");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "time", "del", "2"])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "time", "list", "--period", "2025-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("across 1 entries."));
}
