mod common;
use common::{cdk, init_db_with_data, setup_test_db};
use predicates::prelude::*;

#[test]
fn test_task_list_filters_by_status() {
    let db_path = setup_test_db("task_status_filter");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "task", "done", "1"])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "task", "list", "--status", "todo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Audit").and(predicate::str::contains("Kickoff").not()));

    cdk()
        .args(["--db", &db_path, "task", "list", "--status", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kickoff"));
}

#[test]
fn test_task_list_filters_by_client_and_period() {
    let db_path = setup_test_db("task_client_filter");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "task", "list", "--client", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Audit").and(predicate::str::contains("Kickoff").not()));

    // only task #1 has a due date, in 2025-05
    cdk()
        .args(["--db", &db_path, "task", "list", "--period", "2025-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kickoff").and(predicate::str::contains("Audit").not()));
}

#[test]
fn test_task_add_rejects_bad_inputs() {
    let db_path = setup_test_db("task_bad_inputs");
    init_db_with_data(&db_path);

    cdk()
        .args([
            "--db", &db_path, "task", "add", "X", "--due", "05/10/2025",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));

    cdk()
        .args([
            "--db", &db_path, "task", "add", "X", "--priority", "urgent",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid priority"));
}

#[test]
fn test_task_edit_moves_status() {
    let db_path = setup_test_db("task_edit_status");
    init_db_with_data(&db_path);

    cdk()
        .args([
            "--db",
            &db_path,
            "task",
            "edit",
            "2",
            "--status",
            "in_progress",
        ])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "task", "list", "--status", "in_progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Audit"));
}

#[test]
fn test_overdue_task_is_flagged() {
    let db_path = setup_test_db("task_overdue");
    init_db_with_data(&db_path);

    // task #1 is due 2025-05-10 and still open → overdue marker "!"
    cdk()
        .args(["--db", &db_path, "task", "list", "--client", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-05-10 !"));
}

#[test]
fn test_task_del_removes_row() {
    let db_path = setup_test_db("task_del");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "task", "del", "2"])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Audit").not());
}
